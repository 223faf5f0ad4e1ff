//! Form input accepted by the action routes and its local validation.
//!
//! Validation runs before any backend call. Messages are the ones shown in
//! the page's alert region; several failures are joined with `"; "`.

use serde::Deserialize;

use crate::errors::AppError;
use crate::models::{
    AssignTeacherRequest, ConsultationPayload, CreateCommentRequest, EvaluationPayload, FileKind,
    MilestonePayload, MilestoneStatus, ProjectPayload, RegisterRequest, Role, TeacherRole,
    UpdateUserRequest, WorkType,
};

/// Largest file the upload proxy forwards.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
/// Shortest accepted password.
pub const MIN_PASSWORD_LEN: usize = 8;
/// Roles a visitor may pick when registering.
pub const SELF_REGISTER_ROLES: [Role; 2] = [Role::Student, Role::Teacher];

/// Collects field failures in order.
#[derive(Debug, Default)]
struct Problems(Vec<String>);

impl Problems {
    fn check(&mut self, failed: bool, message: impl Into<String>) {
        if failed {
            self.0.push(message.into());
        }
    }

    fn into_result<T>(self, value: T) -> Result<T, AppError> {
        if self.0.is_empty() {
            Ok(value)
        } else {
            Err(AppError::Validation(self.0.join("; ")))
        }
    }
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Loose email check equivalent to the pattern `\S+@\S+\.\S+`.
pub fn is_valid_email(email: &str) -> bool {
    email.split_whitespace().any(|token| {
        let chars: Vec<char> = token.chars().collect();
        chars.iter().enumerate().any(|(at, c)| {
            *c == '@'
                && at > 0
                && chars
                    .iter()
                    .enumerate()
                    .any(|(dot, d)| *d == '.' && dot > at + 1 && dot + 1 < chars.len())
        })
    })
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut problems = Problems::default();
        problems.check(
            blank(&self.username) || self.password.is_empty(),
            "Zadejte jméno i heslo",
        );
        problems.into_result(())
    }
}

/// Self-registration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub password_confirm: String,
    #[serde(default)]
    pub role: Option<Role>,
}

impl RegisterForm {
    pub fn validate(self) -> Result<RegisterRequest, AppError> {
        if blank(&self.username)
            || blank(&self.email)
            || self.password.is_empty()
            || self.password_confirm.is_empty()
        {
            return Err(AppError::Validation("Prosím vyplňtě všechna pole".to_string()));
        }
        if self.password != self.password_confirm {
            return Err(AppError::Validation("Hesla se neshodují".to_string()));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::Validation(
                "Heslo musí být alespoň 8 znaků".to_string(),
            ));
        }

        let role = self.role.unwrap_or(Role::Student);
        if !SELF_REGISTER_ROLES.contains(&role) {
            return Err(AppError::Validation("Neplatná role".to_string()));
        }

        Ok(RegisterRequest {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password,
            password_confirm: self.password_confirm,
            role,
        })
    }
}

/// Admin form creating a user.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateUserForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub password_confirm: String,
    #[serde(default)]
    pub role: Option<Role>,
}

impl CreateUserForm {
    pub fn validate(self) -> Result<RegisterRequest, AppError> {
        let mut problems = Problems::default();
        problems.check(blank(&self.username), "Uživatelské jméno je povinné");
        if blank(&self.email) {
            problems.check(true, "Email je povinný");
        } else {
            problems.check(!is_valid_email(&self.email), "Email není validní");
        }
        if self.password.is_empty() {
            problems.check(true, "Heslo je povinné");
        } else {
            problems.check(
                self.password.chars().count() < MIN_PASSWORD_LEN,
                "Heslo musí mít alespoň 8 znaků",
            );
        }
        problems.check(self.password != self.password_confirm, "Hesla se neshodují");

        problems.into_result(RegisterRequest {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password,
            password_confirm: self.password_confirm,
            role: self.role.unwrap_or(Role::Student),
        })
    }
}

/// Admin form editing a user.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditUserForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Option<Role>,
}

impl EditUserForm {
    pub fn validate(self) -> Result<UpdateUserRequest, AppError> {
        let mut problems = Problems::default();
        problems.check(blank(&self.username), "Uživatelské jméno je povinné");
        if blank(&self.email) {
            problems.check(true, "Email je povinný");
        } else {
            problems.check(!is_valid_email(&self.email), "Email není validní");
        }

        problems.into_result(UpdateUserRequest {
            username: Some(self.username.trim().to_string()),
            email: Some(self.email.trim().to_string()),
            role: self.role,
        })
    }
}

/// Create and edit form of a project.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub type_of_work: Option<WorkType>,
    #[serde(default)]
    pub public_visibility: Option<bool>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub document: Option<String>,
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(default)]
    pub video: Option<String>,
}

impl ProjectForm {
    /// `current_year` bounds the accepted year to `2000..=current_year + 1`.
    pub fn validate(self, current_year: i32) -> Result<ProjectPayload, AppError> {
        let keywords: Vec<String> = self
            .keywords
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect();

        let mut problems = Problems::default();
        problems.check(blank(&self.title), "Název je povinný");
        problems.check(blank(&self.description), "Popis je povinný");
        problems.check(blank(&self.field), "Obor je povinný");
        match self.year {
            None => problems.check(true, "Rok je povinný"),
            Some(year) => problems.check(
                !(2000..=current_year + 1).contains(&year),
                format!("Rok musí být mezi rokem 2000 a {}", current_year + 1),
            ),
        }
        problems.check(keywords.is_empty(), "Alespoň jedno klíčové slovo je vyžadováno");

        problems.into_result(ProjectPayload {
            title: Some(self.title.trim().to_string()),
            description: Some(self.description.trim().to_string()),
            year: self.year,
            field: Some(self.field.trim().to_string()),
            keywords: Some(keywords),
            type_of_work: Some(self.type_of_work.unwrap_or(WorkType::Soc)),
            status: None,
            public_visibility: Some(self.public_visibility.unwrap_or(false)),
            thumbnail: self.thumbnail,
            document: self.document,
            poster: self.poster,
            video: self.video,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MilestoneForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub deadline: String,
    #[serde(default)]
    pub status: Option<MilestoneStatus>,
    #[serde(default)]
    pub completion: Option<i64>,
}

impl MilestoneForm {
    pub fn validate(self, project: i64) -> Result<MilestonePayload, AppError> {
        let mut problems = Problems::default();
        problems.check(blank(&self.title), "Title is required");
        problems.check(blank(&self.description), "Description is required");
        problems.check(blank(&self.deadline), "Deadline is required");
        if let Some(completion) = self.completion {
            problems.check(
                !(0..=100).contains(&completion),
                "Completion must be between 0 and 100",
            );
        }

        problems.into_result(MilestonePayload {
            project: Some(project),
            title: Some(self.title.trim().to_string()),
            description: Some(self.description.trim().to_string()),
            deadline: Some(self.deadline),
            status: Some(self.status.unwrap_or(MilestoneStatus::NotStarted)),
            completion: self.completion,
        })
    }
}

/// Completion control of a milestone.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionForm {
    pub completion: i64,
}

impl CompletionForm {
    pub fn validate(&self) -> Result<i64, AppError> {
        if !(0..=100).contains(&self.completion) {
            return Err(AppError::Validation(
                "Completion must be between 0 and 100".to_string(),
            ));
        }
        Ok(self.completion)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConsultationForm {
    #[serde(default)]
    pub consultation_date: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl ConsultationForm {
    pub fn validate(self, project: i64) -> Result<ConsultationPayload, AppError> {
        let mut problems = Problems::default();
        problems.check(blank(&self.consultation_date), "Date and time is required");

        problems.into_result(ConsultationPayload {
            project: Some(project),
            consultation_date: Some(self.consultation_date),
            notes: self.notes,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EvaluationForm {
    #[serde(default)]
    pub evaluation: String,
    #[serde(default)]
    pub score: Option<i64>,
}

impl EvaluationForm {
    pub fn validate(self, project: i64) -> Result<EvaluationPayload, AppError> {
        let mut problems = Problems::default();
        problems.check(blank(&self.evaluation), "Evaluation text is required");
        match self.score {
            None => problems.check(true, "Score is required"),
            Some(score) => problems.check(
                !(0..=100).contains(&score),
                "Score must be between 0 and 100",
            ),
        }

        problems.into_result(EvaluationPayload {
            project: Some(project),
            evaluation: Some(self.evaluation.trim().to_string()),
            score: self.score,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentForm {
    #[serde(default)]
    pub comment_text: String,
}

impl CommentForm {
    pub fn validate(self, project: i64) -> Result<CreateCommentRequest, AppError> {
        if blank(&self.comment_text) {
            return Err(AppError::Validation(
                "Komentář nesmí být prázdný".to_string(),
            ));
        }
        Ok(CreateCommentRequest {
            project,
            comment_text: self.comment_text.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssignTeacherForm {
    #[serde(default)]
    pub teacher: Option<i64>,
    #[serde(default)]
    pub role: Option<TeacherRole>,
}

impl AssignTeacherForm {
    pub fn validate(self, project: i64) -> Result<AssignTeacherRequest, AppError> {
        let teacher = self
            .teacher
            .ok_or_else(|| AppError::Validation("Vyberte učitele".to_string()))?;
        Ok(AssignTeacherRequest {
            project,
            teacher,
            role: self.role.unwrap_or(TeacherRole::Supervisor),
        })
    }
}

/// Explicit confirmation required by destructive actions and submission.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Confirmation {
    #[serde(default)]
    pub confirm: bool,
}

impl Confirmation {
    pub fn require(&self) -> Result<(), AppError> {
        if self.confirm {
            Ok(())
        } else {
            Err(AppError::Validation(
                "Akce musí být potvrzena".to_string(),
            ))
        }
    }
}

/// Check an upload before it is forwarded.
pub fn validate_upload(kind: &str, content_type: &str, size: usize) -> Result<FileKind, AppError> {
    let kind = FileKind::from_str(kind)
        .ok_or_else(|| AppError::Validation(format!("Unknown file type: {}", kind)))?;
    if size > MAX_UPLOAD_BYTES {
        return Err(AppError::Validation(
            "File size must be less than 10MB".to_string(),
        ));
    }
    if !kind.accepted_types().contains(&content_type) {
        return Err(AppError::Validation(format!(
            "File type {} is not accepted for {}",
            content_type,
            kind.as_str()
        )));
    }
    Ok(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(password: &str, confirm: &str) -> RegisterForm {
        RegisterForm {
            username: "jana".to_string(),
            email: "jana@example.com".to_string(),
            password: password.to_string(),
            password_confirm: confirm.to_string(),
            role: None,
        }
    }

    fn message(err: AppError) -> String {
        match err {
            AppError::Validation(msg) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_register_messages() {
        let empty = RegisterForm::default().validate().unwrap_err();
        assert_eq!(message(empty), "Prosím vyplňtě všechna pole");

        let mismatch = register("password1", "password2").validate().unwrap_err();
        assert_eq!(message(mismatch), "Hesla se neshodují");

        let short = register("short", "short").validate().unwrap_err();
        assert_eq!(message(short), "Heslo musí být alespoň 8 znaků");

        let ok = register("password1", "password1").validate().unwrap();
        assert_eq!(ok.role, Role::Student);

        let admin = RegisterForm {
            role: Some(Role::Admin),
            ..register("password1", "password1")
        };
        assert_eq!(message(admin.validate().unwrap_err()), "Neplatná role");
    }

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("a@b.cz"));
        assert!(is_valid_email("jan.novak@skola.example.cz"));
        assert!(!is_valid_email("jan@skola"));
        assert!(!is_valid_email("@skola.cz"));
        assert!(!is_valid_email("jan@.cz"));
        assert!(!is_valid_email("jan@skola."));
        assert!(!is_valid_email("jan novak@skola cz"));
    }

    #[test]
    fn test_create_user_collects_all_problems() {
        let form = CreateUserForm {
            username: " ".to_string(),
            email: "nope".to_string(),
            password: "abc".to_string(),
            password_confirm: "abd".to_string(),
            role: Some(Role::Teacher),
        };
        assert_eq!(
            message(form.validate().unwrap_err()),
            "Uživatelské jméno je povinné; Email není validní; Heslo musí mít alespoň 8 znaků; Hesla se neshodují"
        );
    }

    #[test]
    fn test_project_year_bounds() {
        let form = ProjectForm {
            title: "Robotic arm".to_string(),
            description: "Arduino based arm".to_string(),
            year: Some(2027),
            field: "Robotics".to_string(),
            keywords: vec!["arduino".to_string()],
            ..Default::default()
        };
        assert_eq!(
            message(form.clone().validate(2025).unwrap_err()),
            "Rok musí být mezi rokem 2000 a 2026"
        );
        let payload = ProjectForm {
            year: Some(2026),
            ..form
        }
        .validate(2025)
        .unwrap();
        assert_eq!(payload.keywords, Some(vec!["arduino".to_string()]));
        assert_eq!(payload.type_of_work, Some(WorkType::Soc));
    }

    #[test]
    fn test_project_requires_keyword() {
        let form = ProjectForm {
            title: "T".to_string(),
            description: "D".to_string(),
            year: Some(2025),
            field: "F".to_string(),
            keywords: vec!["  ".to_string()],
            ..Default::default()
        };
        assert_eq!(
            message(form.validate(2025).unwrap_err()),
            "Alespoň jedno klíčové slovo je vyžadováno"
        );
    }

    #[test]
    fn test_evaluation_score_range() {
        let form = EvaluationForm {
            evaluation: "Good".to_string(),
            score: Some(101),
        };
        assert_eq!(
            message(form.validate(1).unwrap_err()),
            "Score must be between 0 and 100"
        );
        let missing = EvaluationForm {
            evaluation: String::new(),
            score: None,
        };
        assert_eq!(
            message(missing.validate(1).unwrap_err()),
            "Evaluation text is required; Score is required"
        );
    }

    #[test]
    fn test_upload_checks() {
        assert_eq!(
            validate_upload("document", "application/pdf", 1024).unwrap(),
            FileKind::Document
        );
        assert!(validate_upload("document", "image/png", 1024).is_err());
        assert!(validate_upload("thumbnail", "image/png", MAX_UPLOAD_BYTES + 1).is_err());
        assert!(validate_upload("archive", "application/zip", 10).is_err());
    }

    #[test]
    fn test_confirmation_required() {
        assert!(Confirmation { confirm: false }.require().is_err());
        assert!(Confirmation { confirm: true }.require().is_ok());
    }
}
