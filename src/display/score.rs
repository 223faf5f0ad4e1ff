//! Evaluation scores and evaluation permissions.

use serde::Serialize;

use super::{can_be_evaluated, is_assigned_teacher};
use crate::models::{Project, ProjectEvaluation, Role, User};

/// Mean score rounded to the nearest integer; zero without evaluations.
pub fn average_score(evaluations: &[ProjectEvaluation]) -> i64 {
    if evaluations.is_empty() {
        return 0;
    }
    let sum: i64 = evaluations.iter().map(|e| e.score).sum();
    (sum as f64 / evaluations.len() as f64).round() as i64
}

/// The user already evaluated this project.
pub fn has_evaluated(evaluations: &[ProjectEvaluation], user: Option<&User>) -> bool {
    user.is_some_and(|u| evaluations.iter().any(|e| e.teacher == u.id))
}

/// The "add evaluation" action is offered to accepted teachers of an
/// evaluable project who have not evaluated it yet.
pub fn can_add_evaluation(
    project: &Project,
    evaluations: &[ProjectEvaluation],
    user: Option<&User>,
) -> bool {
    can_be_evaluated(project.status)
        && is_assigned_teacher(project, user)
        && !has_evaluated(evaluations, user)
}

/// Authors edit and delete their own evaluations; admins any.
pub fn can_manage_evaluation(evaluation: &ProjectEvaluation, user: Option<&User>) -> bool {
    user.is_some_and(|u| u.role == Role::Admin || (u.role == Role::Teacher && evaluation.teacher == u.id))
}

/// Newest evaluation first.
pub fn sort_newest_first(evaluations: &mut [ProjectEvaluation]) {
    evaluations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// Evaluations of one project together with their average.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationGroup {
    pub project: i64,
    pub average_score: i64,
    pub evaluations: Vec<ProjectEvaluation>,
}

/// Group by project, keeping the order in which projects first appear.
pub fn group_evaluations_by_project(evaluations: &[ProjectEvaluation]) -> Vec<EvaluationGroup> {
    let mut groups: Vec<EvaluationGroup> = Vec::new();
    for evaluation in evaluations {
        match groups.iter_mut().find(|g| g.project == evaluation.project) {
            Some(group) => group.evaluations.push(evaluation.clone()),
            None => groups.push(EvaluationGroup {
                project: evaluation.project,
                average_score: 0,
                evaluations: vec![evaluation.clone()],
            }),
        }
    }
    for group in &mut groups {
        group.average_score = average_score(&group.evaluations);
    }
    groups
}
