//! Relation tags: class names shared by a wire and the badges of the
//! network interfaces it connects.

fn strip_base<'a>(base: &str, id: &'a str) -> &'a str {
    id.strip_prefix(base).unwrap_or(id)
}

/// Returns the relation class name for a wire between two endpoints, or for
/// a wire going off the grid when `b` is `None`.
///
/// The name is the same regardless of argument order: the lexicographically
/// smaller endpoint id always comes first. Endpoint ids may carry the `base`
/// prefix, which is stripped before composing the name.
pub fn relation_class_name(base: &str, a: &str, b: Option<&str>) -> String {
    let a = strip_base(base, a);
    match b.map(|b| strip_base(base, b)) {
        None => format!("{}rel-{}", base, a),
        Some(b) if a <= b => format!("{}rel-{}-{}", base, a, b),
        Some(b) => format!("{}rel-{}-{}", base, b, a),
    }
}

pub fn is_relation_class_name(base: &str, class_name: &str) -> bool {
    class_name
        .strip_prefix(base)
        .is_some_and(|rest| rest.starts_with("rel-"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stable_order() {
        assert_eq!(
            relation_class_name("", "nif-1-b", Some("nif-1-a")),
            relation_class_name("", "nif-1-a", Some("nif-1-b"))
        );
        assert_eq!(
            relation_class_name("", "nif-1-b", Some("nif-1-a")),
            "rel-nif-1-a-nif-1-b"
        );
    }

    #[test]
    fn test_base_prefix_stripped() {
        assert_eq!(
            relation_class_name("bb1-", "bb1-nif-2-eth0", Some("bb1-nif-1-veth0")),
            "bb1-rel-nif-1-veth0-nif-2-eth0"
        );
    }

    #[test]
    fn test_single_ended() {
        assert_eq!(relation_class_name("x-", "nif-1-eth0", None), "x-rel-nif-1-eth0");
    }

    #[test]
    fn test_is_relation_class_name() {
        assert!(is_relation_class_name("x-", "x-rel-nif-1-eth0"));
        assert!(!is_relation_class_name("x-", "rel-nif-1-eth0"));
        assert!(!is_relation_class_name("x-", "x-wire"));
        assert!(is_relation_class_name("", "rel-a-b"));
    }
}
