//! Tests for toleration flattening and expansion.

#[cfg(test)]
mod tests {
    use k8s_openapi::api::core::v1::Toleration;
    use pretty_assertions::assert_eq;

    use crate::error::DecodeError;
    use crate::structures::{expand_tolerations, flatten_tolerations, Structure};
    use crate::value::{Map, Value};

    fn map<const N: usize>(pairs: [(&str, &str); N]) -> Value {
        Value::Map(pairs.into_iter().collect::<Map>())
    }

    fn toleration(key: &str, value: &str, operator: &str) -> Toleration {
        let non_empty = |s: &str| Some(s.to_string()).filter(|s| !s.is_empty());
        Toleration {
            key: non_empty(key),
            value: non_empty(value),
            operator: non_empty(operator),
            ..Default::default()
        }
    }

    // ============ Flatten ============

    #[test]
    fn test_flatten_key_value() {
        let input = vec![toleration("node-role.kubernetes.io/spot-worker", "true", "")];
        assert_eq!(
            flatten_tolerations(&input),
            vec![map([
                ("key", "node-role.kubernetes.io/spot-worker"),
                ("value", "true"),
            ])]
        );
    }

    #[test]
    fn test_flatten_keeps_order() {
        let input = vec![
            toleration("node-role.kubernetes.io/other-worker", "", "Exists"),
            toleration("node-role.kubernetes.io/spot-worker", "true", ""),
        ];
        assert_eq!(
            flatten_tolerations(&input),
            vec![
                map([
                    ("key", "node-role.kubernetes.io/other-worker"),
                    ("operator", "Exists"),
                ]),
                map([
                    ("key", "node-role.kubernetes.io/spot-worker"),
                    ("value", "true"),
                ]),
            ]
        );
    }

    #[test]
    fn test_flatten_toleration_seconds() {
        let input = vec![Toleration {
            effect: Some("NoExecute".to_string()),
            toleration_seconds: Some(120),
            ..Default::default()
        }];
        assert_eq!(
            flatten_tolerations(&input),
            vec![map([("effect", "NoExecute"), ("toleration_seconds", "120")])]
        );
    }

    #[test]
    fn test_flatten_empty() {
        assert_eq!(flatten_tolerations(&[]), Vec::<Value>::new());
    }

    #[test]
    fn test_flatten_omits_empty_strings() {
        let input = vec![Toleration {
            key: Some(String::new()),
            operator: Some("Exists".to_string()),
            ..Default::default()
        }];
        assert_eq!(flatten_tolerations(&input), vec![map([("operator", "Exists")])]);
    }

    // ============ Expand ============

    #[test]
    fn test_expand_key_value() {
        let input = vec![map([
            ("key", "node-role.kubernetes.io/spot-worker"),
            ("value", "true"),
        ])];
        assert_eq!(
            expand_tolerations(&input).unwrap(),
            vec![toleration("node-role.kubernetes.io/spot-worker", "true", "")]
        );
    }

    #[test]
    fn test_expand_keeps_order() {
        let input = vec![
            map([
                ("key", "node-role.kubernetes.io/spot-worker"),
                ("value", "true"),
            ]),
            map([
                ("key", "node-role.kubernetes.io/other-worker"),
                ("operator", "Exists"),
            ]),
        ];
        assert_eq!(
            expand_tolerations(&input).unwrap(),
            vec![
                toleration("node-role.kubernetes.io/spot-worker", "true", ""),
                toleration("node-role.kubernetes.io/other-worker", "", "Exists"),
            ]
        );
    }

    #[test]
    fn test_expand_toleration_seconds() {
        let input = vec![map([("effect", "NoExecute"), ("toleration_seconds", "120")])];
        assert_eq!(
            expand_tolerations(&input).unwrap(),
            vec![Toleration {
                effect: Some("NoExecute".to_string()),
                toleration_seconds: Some(120),
                ..Default::default()
            }]
        );
    }

    #[test]
    fn test_expand_empty() {
        assert_eq!(expand_tolerations(&[]).unwrap(), Vec::<Toleration>::new());
    }

    #[test]
    fn test_expand_empty_seconds_is_unset() {
        let input = vec![map([("key", "dedicated"), ("toleration_seconds", "")])];
        let output = expand_tolerations(&input).unwrap();
        assert_eq!(output[0].toleration_seconds, None);
    }

    #[test]
    fn test_expand_invalid_seconds_fails() {
        let input = vec![
            map([("key", "dedicated")]),
            map([("effect", "NoExecute"), ("toleration_seconds", "not-a-number")]),
        ];
        let err = expand_tolerations(&input).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidInteger { .. }), "{:?}", err);
        assert_eq!(err.path().to_string(), "tolerations[1].toleration_seconds");
    }

    #[test]
    fn test_expand_rejects_non_map_element() {
        let input = vec![Value::from("NoSchedule")];
        let err = expand_tolerations(&input).unwrap_err();
        assert_eq!(err.path().to_string(), "tolerations[0]");
    }

    // ============ Round trips ============

    #[test]
    fn test_typed_roundtrip() {
        let input = vec![
            toleration("node-role.kubernetes.io/other-worker", "", "Exists"),
            toleration("node-role.kubernetes.io/spot-worker", "true", "Equal"),
            Toleration {
                key: Some("node.kubernetes.io/unreachable".to_string()),
                effect: Some("NoExecute".to_string()),
                operator: Some("Exists".to_string()),
                toleration_seconds: Some(300),
                ..Default::default()
            },
        ];
        assert_eq!(expand_tolerations(&flatten_tolerations(&input)).unwrap(), input);
    }

    #[test]
    fn test_dynamic_roundtrip() {
        let input = vec![
            map([("key", "dedicated"), ("value", "gpu"), ("effect", "NoSchedule")]),
            map([("operator", "Exists")]),
        ];
        let expanded = expand_tolerations(&input).unwrap();
        assert_eq!(flatten_tolerations(&expanded), input);
    }

    #[test]
    fn test_structure_trait() {
        let input = vec![map([("key", "dedicated")])];
        let expanded = <Vec<Toleration> as Structure>::expand(&input).unwrap();
        assert_eq!(expanded.flatten(), input);
        assert_eq!(<Vec<Toleration> as Structure>::KIND, "tolerations");
    }
}
