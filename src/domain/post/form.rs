use serde::Deserialize;

use super::Post;
use crate::domain::group::Group;

pub const REQUIRED_MESSAGE: &str = "Обязательное поле.";
pub const INVALID_CHOICE_MESSAGE: &str =
    "Выберите корректный вариант. Вашего варианта нет среди допустимых значений.";
/// Postgres text columns cannot store NUL.
pub const NULL_CHARACTER_MESSAGE: &str = "Данные содержат запрещённый символ: ноль-байт";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text, rendered as a textarea
    Char,
    /// One of a fixed set of values, rendered as a select
    Choice,
}

/// Static description of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub help_text: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

pub const TEXT_FIELD: FieldSpec = FieldSpec {
    name: "text",
    label: "Текст поста",
    help_text: "Текст нового поста",
    kind: FieldKind::Char,
    required: true,
};

pub const GROUP_FIELD: FieldSpec = FieldSpec {
    name: "group",
    label: "Группа",
    help_text: "Группа, к которой будет относиться пост",
    kind: FieldKind::Choice,
    required: false,
};

/// Raw urlencoded submission of the post form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostFormData {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub group: String,
}

/// Validated values, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedPost {
    pub text: String,
    pub group_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub text: Vec<String>,
    pub group: Vec<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.group.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupChoice {
    pub id: i64,
    pub title: String,
}

impl From<Group> for GroupChoice {
    fn from(group: Group) -> Self {
        Self {
            id: group.id,
            title: group.title,
        }
    }
}

/// `<option>` of the group select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupOption {
    pub value: String,
    pub title: String,
    pub selected: bool,
}

/// State of the create/edit form as shown to the user.
#[derive(Debug, Clone, Default)]
pub struct PostForm {
    pub text: String,
    pub group: Option<i64>,
    pub choices: Vec<GroupChoice>,
    pub errors: FieldErrors,
}

impl PostForm {
    pub fn fields() -> [FieldSpec; 2] {
        [TEXT_FIELD, GROUP_FIELD]
    }

    pub fn field(name: &str) -> Option<FieldSpec> {
        Self::fields().into_iter().find(|field| field.name == name)
    }

    pub fn empty(choices: Vec<GroupChoice>) -> Self {
        Self {
            choices,
            ..Self::default()
        }
    }

    /// Form pre-filled from an existing post.
    pub fn from_post(post: &Post, choices: Vec<GroupChoice>) -> Self {
        Self {
            text: post.text.clone(),
            group: post.group_id,
            choices,
            errors: FieldErrors::default(),
        }
    }

    /// Form redisplaying a rejected submission.
    pub fn rejected(data: &PostFormData, choices: Vec<GroupChoice>, errors: FieldErrors) -> Self {
        Self {
            text: data.text.clone(),
            group: data.group.trim().parse().ok(),
            choices,
            errors,
        }
    }

    /// Validate a submission against the currently existing groups.
    pub fn clean(data: &PostFormData, choices: &[GroupChoice]) -> Result<CleanedPost, FieldErrors> {
        let mut errors = FieldErrors::default();

        let text = data.text.trim();
        if text.is_empty() {
            errors.text.push(REQUIRED_MESSAGE.to_string());
        } else if text.contains('\0') {
            errors.text.push(NULL_CHARACTER_MESSAGE.to_string());
        }

        let raw_group = data.group.trim();
        let group_id = if raw_group.is_empty() {
            None
        } else {
            match raw_group.parse::<i64>() {
                Ok(id) if choices.iter().any(|choice| choice.id == id) => Some(id),
                _ => {
                    errors.group.push(INVALID_CHOICE_MESSAGE.to_string());
                    None
                }
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(CleanedPost {
            text: text.to_string(),
            group_id,
        })
    }

    pub fn text_field(&self) -> FieldSpec {
        TEXT_FIELD
    }

    pub fn group_field(&self) -> FieldSpec {
        GROUP_FIELD
    }

    /// Select options, led by the empty choice.
    pub fn group_options(&self) -> Vec<GroupOption> {
        let mut options = vec![GroupOption {
            value: String::new(),
            title: "---------".to_string(),
            selected: self.group.is_none(),
        }];
        options.extend(self.choices.iter().map(|choice| GroupOption {
            value: choice.id.to_string(),
            title: choice.title.clone(),
            selected: self.group == Some(choice.id),
        }));
        options
    }
}
