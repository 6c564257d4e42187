use std::any::TypeId;
use std::fmt;

/// Identifier of a binding: the token type it was registered under
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceId {
    pub type_id: TypeId,
    pub type_name: &'static str,
}

impl ServiceId {
    /// Create a new service ID for a type
    pub fn of<T: 'static + ?Sized>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Type name without its module path, for log output
    pub fn short_name(&self) -> &'static str {
        let base = self.type_name.split('<').next().unwrap_or(self.type_name);
        let start = base.rfind("::").map(|i| i + 2).unwrap_or(0);
        &self.type_name[start..]
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct LoggerToken;
    struct Wrapper<T>(T);

    #[test]
    fn test_service_id_equality_follows_type() {
        assert_eq!(
            ServiceId::of::<LoggerToken>(),
            ServiceId::of::<LoggerToken>()
        );
        assert_ne!(ServiceId::of::<LoggerToken>(), ServiceId::of::<String>());
    }

    #[test]
    fn test_short_name() {
        assert_eq!(ServiceId::of::<LoggerToken>().short_name(), "LoggerToken");
        assert_eq!(
            ServiceId::of::<Wrapper<LoggerToken>>().short_name(),
            "Wrapper<strata_core::container::descriptor::tests::LoggerToken>"
        );
        assert_eq!(ServiceId::of::<u32>().short_name(), "u32");
    }
}
