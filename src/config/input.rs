//! Input configuration options for noice
//!
//! This module defines the key binding table which is read from the noice.toml
//! configuration file. Each `[[bindings]]` entry is one record of
//! key, action and optional program parameters. Records are evaluated in order.

use crate::app::keymap::Action;
use serde::Deserialize;

/// A single binding as written in the configuration file.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct BindingSpec {
    key: String,
    action: Action,
    #[serde(default)]
    run: Option<String>,
    #[serde(default)]
    env: Option<String>,
    #[serde(default)]
    args: Option<String>,
}

impl BindingSpec {
    pub fn new(key: &str, action: Action) -> Self {
        BindingSpec {
            key: key.into(),
            action,
            run: None,
            env: None,
            args: None,
        }
    }

    /// Binding that launches `run`, overridable through the `env` variable.
    pub fn program(key: &str, action: Action, run: &str, env: Option<&str>) -> Self {
        BindingSpec {
            run: Some(run.into()),
            env: env.map(Into::into),
            ..Self::new(key, action)
        }
    }

    pub fn with_args(mut self, args: &str) -> Self {
        self.args = Some(args.into());
        self
    }

    // Accessors

    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[inline]
    pub fn action(&self) -> Action {
        self.action
    }

    #[inline]
    pub fn run(&self) -> Option<&str> {
        self.run.as_deref()
    }

    #[inline]
    pub fn env(&self) -> Option<&str> {
        self.env.as_deref()
    }

    #[inline]
    pub fn args(&self) -> Option<&str> {
        self.args.as_deref()
    }
}

/// The built-in binding table.
#[rustfmt::skip]
pub fn default_bindings() -> Vec<BindingSpec> {
    use Action as A;
    use BindingSpec as B;

    vec![
        B::new("q",         A::Quit),

        B::new("backspace", A::Ascend),
        B::new("left",      A::Ascend),
        B::new("h",         A::Ascend),
        B::new("ctrl+h",    A::Ascend),

        B::new("enter",     A::Descend),
        B::new("right",     A::Descend),
        B::new("l",         A::Descend),

        B::new("/",         A::Filter),
        B::new("&",         A::Filter),
        B::new("?",         A::TypeFilter),

        B::new("j",         A::Next),
        B::new("down",      A::Next),
        B::new("ctrl+n",    A::Next),
        B::new("k",         A::Prev),
        B::new("up",        A::Prev),
        B::new("ctrl+p",    A::Prev),
        B::new("pagedown",  A::PageDown),
        B::new("ctrl+d",    A::PageDown),
        B::new("pageup",    A::PageUp),
        B::new("ctrl+u",    A::PageUp),
        B::new("home",      A::First),
        B::new("ctrl+a",    A::First),
        B::new("^",         A::First),
        B::new("end",       A::Last),
        B::new("ctrl+e",    A::Last),
        B::new("$",         A::Last),

        B::new("c",         A::ChangeDir),
        B::new("~",         A::GoHome),
        B::new("t",         A::ToggleSort),
        B::new("ctrl+l",    A::Redraw),

        B::program("z",     A::Run,        "top",  None),
        B::program("!",     A::Run,        "sh",   Some("SHELL")),
        B::program("e",     A::RunWithArg, "vi",   Some("EDITOR")),
        B::program("p",     A::RunWithArg, "less", Some("PAGER")),

        B::new(".",         A::ToggleDotfiles),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_from_toml() -> Result<(), Box<dyn std::error::Error>> {
        let spec: BindingSpec = toml::from_str(
            r#"
            key = "e"
            action = "run_with_arg"
            run = "vi"
            env = "EDITOR"
            args = "-R"
            "#,
        )?;
        assert_eq!(spec.key(), "e");
        assert_eq!(spec.action(), Action::RunWithArg);
        assert_eq!(spec.run(), Some("vi"));
        assert_eq!(spec.env(), Some("EDITOR"));
        assert_eq!(spec.args(), Some("-R"));
        Ok(())
    }

    #[test]
    fn unknown_action_is_rejected() {
        let result: Result<BindingSpec, _> = toml::from_str(
            r#"
            key = "x"
            action = "explode"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn default_table_binds_every_action() {
        let table = default_bindings();
        for action in Action::ALL {
            assert!(
                table.iter().any(|b| b.action() == *action),
                "{action:?} has no default binding"
            );
        }
    }
}
