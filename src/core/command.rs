//! Command lines for external tools
//!
//! A [`CommandLine`] is a program, its arguments and optional text fed
//! to its standard input. Rendering one for display masks the password.

use std::fmt;

const MASK: &str = "****";

/// Connection parameters shared by every run of a sweep
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub username: String,
    pub password: String,
    pub connect_string: String,
}

impl Connection {
    pub fn new<S: Into<String>>(username: S, password: S, connect_string: S) -> Self {
        Connection {
            username: username.into(),
            password: password.into(),
            connect_string: connect_string.into(),
        }
    }

    /// `user/password@connect_string`, as SQL*Plus style clients expect
    pub fn credentials(&self) -> String {
        format!("{}/{}@{}", self.username, self.password, self.connect_string)
    }
}

/// A fully formatted invocation of an external executable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
    pub stdin: Option<String>,
    secret: Option<String>,
}

impl CommandLine {
    pub fn new<S: Into<String>>(program: S) -> Self {
        CommandLine {
            program: program.into(),
            args: Vec::new(),
            stdin: None,
            secret: None,
        }
    }

    pub fn arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append a flag followed by its value
    pub fn opt<V: ToString>(self, flag: &str, value: V) -> Self {
        self.arg(flag).arg(value.to_string())
    }

    pub fn stdin<S: Into<String>>(mut self, input: S) -> Self {
        self.stdin = Some(input.into());
        self
    }

    /// Hide `secret` whenever this command is displayed
    pub fn redact<S: Into<String>>(mut self, secret: S) -> Self {
        let secret = secret.into();
        if !secret.is_empty() {
            self.secret = Some(secret);
        }
        self
    }

    fn masked(&self, arg: &str) -> String {
        match &self.secret {
            Some(secret) if arg == secret => MASK.to_string(),
            Some(secret) => arg.replace(&format!("/{}@", secret), &format!("/{}@", MASK)),
            None => arg.to_string(),
        }
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", self.masked(arg))?;
        }
        Ok(())
    }
}
