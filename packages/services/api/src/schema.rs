//! Request payloads and input-shape validation
//!
//! Create payloads require every field; update payloads accept any subset
//! (partial update). Violations collect into a structured problem list so
//! the caller sees everything wrong at once, not just the first field.

use pinboard_core::error::FieldProblem;
use pinboard_core::{Error, Result};
use serde::Deserialize;

const MAX_NAME_LEN: usize = 50;

const PASSWORD_RULE: &str =
    "the password is too simple: it must contain digits, uppercase and lowercase letters, and no whitespace";

#[derive(Debug, Deserialize)]
pub struct CreateAccount {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateAccount {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePost {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdatePost {
    pub title: Option<String>,
    pub body: Option<String>,
}

impl CreateAccount {
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();
        check_username(&self.username, &mut problems);
        check_password(&self.password, &mut problems);
        finish(problems)
    }
}

impl UpdateAccount {
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();
        if let Some(username) = &self.username {
            check_username(username, &mut problems);
        }
        if let Some(password) = &self.password {
            check_password(password, &mut problems);
        }
        finish(problems)
    }
}

impl CreatePost {
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();
        check_title(&self.title, &mut problems);
        check_body(&self.body, &mut problems);
        finish(problems)
    }
}

impl UpdatePost {
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();
        if let Some(title) = &self.title {
            check_title(title, &mut problems);
        }
        if let Some(body) = &self.body {
            check_body(body, &mut problems);
        }
        finish(problems)
    }
}

fn finish(problems: Vec<FieldProblem>) -> Result<()> {
    if problems.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation(problems))
    }
}

fn check_username(username: &str, problems: &mut Vec<FieldProblem>) {
    if username.is_empty() {
        problems.push(FieldProblem::new("username", "must not be empty"));
    } else if username.chars().count() > MAX_NAME_LEN {
        problems.push(FieldProblem::new(
            "username",
            format!("must be at most {MAX_NAME_LEN} characters"),
        ));
    }
}

fn check_password(password: &str, problems: &mut Vec<FieldProblem>) {
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_lower = password.chars().any(|c| c.is_lowercase());
    let has_upper = password.chars().any(|c| c.is_uppercase());
    let has_space = password.chars().any(char::is_whitespace);

    if !has_digit || !has_lower || !has_upper || has_space {
        problems.push(FieldProblem::new("password", PASSWORD_RULE));
    }
}

fn check_title(title: &str, problems: &mut Vec<FieldProblem>) {
    if title.is_empty() {
        problems.push(FieldProblem::new("title", "must not be empty"));
    } else if title.chars().count() > MAX_NAME_LEN {
        problems.push(FieldProblem::new(
            "title",
            format!("must be at most {MAX_NAME_LEN} characters"),
        ));
    }
}

fn check_body(body: &str, problems: &mut Vec<FieldProblem>) {
    if body.is_empty() {
        problems.push(FieldProblem::new("body", "must not be empty"));
    }
}
