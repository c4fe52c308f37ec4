use std::fmt;

use indexmap::IndexMap;

use crate::error::AppError;

/// Component category → chosen value, in the order the widget sent them.
pub type ContextSet = IndexMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Model,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Role {
    type Error = AppError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "user" => Ok(Role::User),
            "model" => Ok(Role::Model),
            other => Err(AppError::invalid(format!("Rol no reconocido en el historial: '{other}'."))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: Role::User, text: text.into() }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self { role: Role::Model, text: text.into() }
    }
}

/// `k1: v1, k2: v2`
pub fn render_context(context: &ContextSet) -> String {
    context
        .iter()
        .map(|(k, v)| format!("{k}: {v}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parsing_is_strict() {
        assert_eq!(Role::try_from("user").unwrap(), Role::User);
        assert_eq!(Role::try_from("model").unwrap(), Role::Model);
        assert!(matches!(Role::try_from("assistant"), Err(AppError::InvalidInput(_))));
        assert!(Role::try_from("User").is_err());
    }

    #[test]
    fn context_keeps_insertion_order() {
        let mut ctx = ContextSet::new();
        ctx.insert("GPU".into(), "RTX 4060".into());
        ctx.insert("CPU".into(), "Ryzen 5 7600".into());
        assert_eq!(render_context(&ctx), "GPU: RTX 4060, CPU: Ryzen 5 7600");
        assert_eq!(render_context(&ContextSet::new()), "");
    }
}
