//! 限定名解析
//!
//! `[/namespace/][package/]name` 形式：前导 `/` 表示首段为显式 namespace（允许 2-3 段）；
//! 无前导 `/` 时 1 段为 name、2 段为 package/name、3 段为 namespace/package/name。
//! namespace 缺省为 `_`。

use crate::core::ClientError;

/// 解析后的限定名三元组
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedName {
    pub namespace: String,
    pub package: Option<String>,
    pub name: String,
}

impl QualifiedName {
    /// 按 `/` 切分限定名（忽略空段）；段数非法时返回 QualifiedName 错误
    pub fn parse(qualified: &str) -> Result<Self, ClientError> {
        let has_namespace = qualified.starts_with('/');
        let parts: Vec<&str> = qualified.split('/').filter(|s| !s.is_empty()).collect();

        let (namespace, package, name) = if has_namespace {
            match parts.as_slice() {
                [ns, name] => ((*ns).to_string(), None, (*name).to_string()),
                [ns, pkg, name] => {
                    ((*ns).to_string(), Some((*pkg).to_string()), (*name).to_string())
                }
                _ => {
                    return Err(ClientError::QualifiedName(format!(
                        "Cannot parse {}",
                        qualified
                    )))
                }
            }
        } else {
            match parts.as_slice() {
                [name] => ("_".to_string(), None, (*name).to_string()),
                [pkg, name] => ("_".to_string(), Some((*pkg).to_string()), (*name).to_string()),
                [ns, pkg, name] => {
                    ((*ns).to_string(), Some((*pkg).to_string()), (*name).to_string())
                }
                _ => {
                    return Err(ClientError::QualifiedName(format!(
                        "Cannot parse {}",
                        qualified
                    )))
                }
            }
        };

        Ok(Self {
            namespace,
            package,
            name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_name() {
        let parts = QualifiedName::parse("hello").unwrap();
        assert_eq!(parts.namespace, "_");
        assert_eq!(parts.package, None);
        assert_eq!(parts.name, "hello");
    }

    #[test]
    fn test_parse_package_and_name() {
        let parts = QualifiedName::parse("pkg/name").unwrap();
        assert_eq!(parts.namespace, "_");
        assert_eq!(parts.package.as_deref(), Some("pkg"));
        assert_eq!(parts.name, "name");
    }

    #[test]
    fn test_parse_three_segments_without_slash() {
        let parts = QualifiedName::parse("ns/pkg/name").unwrap();
        assert_eq!(parts.namespace, "ns");
        assert_eq!(parts.package.as_deref(), Some("pkg"));
        assert_eq!(parts.name, "name");
    }

    #[test]
    fn test_parse_explicit_namespace() {
        let parts = QualifiedName::parse("/ns/name").unwrap();
        assert_eq!(parts.namespace, "ns");
        assert_eq!(parts.package, None);
        assert_eq!(parts.name, "name");

        let parts = QualifiedName::parse("/ns/pkg/name").unwrap();
        assert_eq!(parts.namespace, "ns");
        assert_eq!(parts.package.as_deref(), Some("pkg"));
        assert_eq!(parts.name, "name");
    }

    #[test]
    fn test_parse_too_many_segments() {
        assert!(matches!(
            QualifiedName::parse("a/b/c/d"),
            Err(ClientError::QualifiedName(_))
        ));
        assert!(matches!(
            QualifiedName::parse("/a/b/c/d"),
            Err(ClientError::QualifiedName(_))
        ));
    }

    #[test]
    fn test_parse_namespace_without_name() {
        // 前导 / 后只有一段：缺少 name
        assert!(matches!(
            QualifiedName::parse("/ns"),
            Err(ClientError::QualifiedName(_))
        ));
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(
            QualifiedName::parse(""),
            Err(ClientError::QualifiedName(_))
        ));
    }
}
