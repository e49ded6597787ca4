#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Static data model of recycling-project tasks.
//!
//! The roster is plain data consumed by presentation layers: projects group
//! tasks, each task carries a screen-reader-friendly state label, a
//! responsible person, a team of at least four people, and an optional
//! validation timestamp that opens a fixed time window for completion.
//! Queries return new collections; the seed data itself is never mutated.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum number of people required on any task team.
pub const MIN_TEAM_SIZE: usize = 4;

/// Notice shown alongside validated tasks.
pub const VALIDATION_WINDOW_MESSAGE: &str = "Una vez validado el inicio de la tarea, \
     comienza el conteo de tiempo disponible para terminarla.";

/// Lifecycle state of a task.
///
/// Serialized forms keep the original Spanish labels read aloud by screen
/// readers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskState {
    /// Work has not started.
    #[serde(rename = "pendiente")]
    Pending,
    /// Work is underway inside a validated time window.
    #[serde(rename = "en progreso")]
    InProgress,
    /// Work finished.
    #[serde(rename = "completada")]
    Done,
}

impl TaskState {
    /// Human-readable label, identical to the serialized form.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "pendiente",
            Self::InProgress => "en progreso",
            Self::Done => "completada",
        }
    }
}

/// One unit of recycling work assigned to a team.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Stable identifier, unique across all projects.
    pub id: String,
    /// Short imperative title.
    pub title: String,
    /// Current lifecycle state.
    pub state: TaskState,
    /// Person accountable for the task.
    pub responsible: String,
    /// Everyone assigned to the task, including the responsible person.
    pub team: Vec<String>,
    /// RFC 3339 timestamp of start validation, when it happened.
    pub validated_at: Option<String>,
    /// Hours available to finish once the start is validated.
    pub time_limit_hours: u32,
    /// Calendar due date in `YYYY-MM-DD` form.
    pub due_date: String,
}

impl Task {
    /// Reports whether the task's start has been validated.
    #[must_use]
    pub fn is_validated(&self) -> bool {
        self.validated_at.is_some()
    }

    /// Hours remaining in the completion window, counted from validation.
    /// Returns `None` while the start has not been validated yet.
    #[must_use]
    pub fn completion_window_hours(&self) -> Option<u32> {
        self.validated_at.as_ref().map(|_| self.time_limit_hours)
    }

    /// Checks the minimum-team-size rule.
    pub fn validate_team(&self) -> Result<(), RosterError> {
        if self.team.len() < MIN_TEAM_SIZE {
            return Err(RosterError::UnderstaffedTeam {
                task: self.id.clone(),
                members: self.team.len(),
            });
        }
        Ok(())
    }
}

/// A recycling project grouping related tasks around one focus area.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Physical area the project concentrates on.
    pub focus_area: String,
    /// Tasks composing the project.
    pub tasks: Vec<Task>,
}

impl Project {
    /// Iterator over the project's tasks currently in the provided state.
    pub fn tasks_in_state(&self, state: TaskState) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |task| task.state == state)
    }
}

/// Reasons roster data may violate the caller contract.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RosterError {
    /// A task team fell below the minimum size.
    #[error("task {task} needs at least {MIN_TEAM_SIZE} team members, got {members}")]
    UnderstaffedTeam {
        /// Identifier of the offending task.
        task: String,
        /// Number of members actually assigned.
        members: usize,
    },
}

/// Returns copies of the provided projects containing only tasks in the
/// requested state; projects left with no matching tasks are dropped.
#[must_use]
pub fn filter_by_state(projects: &[Project], state: TaskState) -> Vec<Project> {
    projects
        .iter()
        .map(|project| Project {
            id: project.id.clone(),
            name: project.name.clone(),
            focus_area: project.focus_area.clone(),
            tasks: project
                .tasks
                .iter()
                .filter(|task| task.state == state)
                .cloned()
                .collect(),
        })
        .filter(|project| !project.tasks.is_empty())
        .collect()
}

/// Built-in roster mirroring the school's three recycling projects.
#[must_use]
pub fn projects() -> Vec<Project> {
    vec![
        Project {
            id: "carton".into(),
            name: "Cartón y papel".into(),
            focus_area: "Centro de acopio".into(),
            tasks: vec![
                task(
                    "carton-recoger",
                    "Recoger",
                    TaskState::Pending,
                    "María López",
                    &["María López", "Jesús Ramírez", "Alicia Torres", "David Cruz"],
                    None,
                    8,
                    "2024-11-01",
                ),
                task(
                    "carton-organizar",
                    "Organizar",
                    TaskState::Pending,
                    "Carlos Méndez",
                    &["Carlos Méndez", "Juana Pérez", "Rubén García", "Paulina Ortega"],
                    None,
                    6,
                    "2024-11-02",
                ),
                task(
                    "carton-cortar",
                    "Cortar",
                    TaskState::InProgress,
                    "Juana Pérez",
                    &["Juana Pérez", "Andrea Silva", "Marco Luna", "Sara Díaz"],
                    Some("2024-10-18T09:00:00Z"),
                    5,
                    "2024-10-18",
                ),
                task(
                    "carton-pegar",
                    "Pegar",
                    TaskState::Pending,
                    "Alicia Torres",
                    &["Alicia Torres", "Ernesto Aguilar", "Brenda Flores", "Óscar Neri"],
                    None,
                    4,
                    "2024-11-03",
                ),
            ],
        },
        Project {
            id: "pet".into(),
            name: "PET".into(),
            focus_area: "Aulas B y patios laterales".into(),
            tasks: vec![
                task(
                    "pet-recoger",
                    "Recoger",
                    TaskState::Pending,
                    "Laura Sánchez",
                    &["Laura Sánchez", "Hugo Martínez", "Ana Beltrán", "Rafael Gómez"],
                    None,
                    8,
                    "2024-10-28",
                ),
                task(
                    "pet-lavar",
                    "Lavar",
                    TaskState::InProgress,
                    "Hugo Martínez",
                    &["Hugo Martínez", "Itzel Ríos", "Kevin Ávila", "Daniela Vázquez"],
                    Some("2024-10-17T15:00:00Z"),
                    6,
                    "2024-10-18",
                ),
                task(
                    "pet-organizar",
                    "Organizar",
                    TaskState::Pending,
                    "Ana Beltrán",
                    &["Ana Beltrán", "Mario Pineda", "Sofía Rangel", "Luis Herrera"],
                    None,
                    5,
                    "2024-10-30",
                ),
                task(
                    "pet-compactar",
                    "Compactar",
                    TaskState::Done,
                    "Kevin Ávila",
                    &["Kevin Ávila", "Itzel Ríos", "Hugo Martínez", "Daniela Vázquez"],
                    Some("2024-10-15T10:00:00Z"),
                    7,
                    "2024-10-16",
                ),
            ],
        },
        Project {
            id: "composta".into(),
            name: "Composta".into(),
            focus_area: "Patios verdes y laboratorio".into(),
            tasks: vec![
                task(
                    "composta-recolectar",
                    "Recolectar",
                    TaskState::Pending,
                    "Rosa Hernández",
                    &["Rosa Hernández", "Miguel Paredes", "Elena Cruz", "José Maldonado"],
                    None,
                    10,
                    "2024-11-05",
                ),
                task(
                    "composta-mezclar",
                    "Mezclar",
                    TaskState::Pending,
                    "Elena Cruz",
                    &["Elena Cruz", "Liliana Ochoa", "Fernando Vega", "Patricia Ruiz"],
                    None,
                    8,
                    "2024-11-06",
                ),
                task(
                    "composta-remover",
                    "Remover",
                    TaskState::InProgress,
                    "Miguel Paredes",
                    &["Miguel Paredes", "Ximena Soto", "César León", "Diana Mora"],
                    Some("2024-10-17T12:30:00Z"),
                    6,
                    "2024-10-18",
                ),
                task(
                    "composta-hidratar",
                    "Hidratar",
                    TaskState::Pending,
                    "Patricia Ruiz",
                    &[
                        "Patricia Ruiz",
                        "José Maldonado",
                        "Araceli Vázquez",
                        "Carmen Figueroa",
                    ],
                    None,
                    5,
                    "2024-11-04",
                ),
                task(
                    "composta-empaquetar",
                    "Empaquetar",
                    TaskState::Done,
                    "Liliana Ochoa",
                    &[
                        "Liliana Ochoa",
                        "Fernando Vega",
                        "Patricia Ruiz",
                        "Araceli Vázquez",
                    ],
                    Some("2024-10-10T08:00:00Z"),
                    4,
                    "2024-10-11",
                ),
            ],
        },
    ]
}

#[allow(clippy::too_many_arguments)]
fn task(
    id: &str,
    title: &str,
    state: TaskState,
    responsible: &str,
    team: &[&str],
    validated_at: Option<&str>,
    time_limit_hours: u32,
    due_date: &str,
) -> Task {
    Task {
        id: id.into(),
        title: title.into(),
        state,
        responsible: responsible.into(),
        team: team.iter().map(|member| (*member).into()).collect(),
        validated_at: validated_at.map(Into::into),
        time_limit_hours,
        due_date: due_date.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::{filter_by_state, projects, RosterError, Task, TaskState, MIN_TEAM_SIZE};

    #[test]
    fn labels_match_the_serialized_forms() {
        assert_eq!(TaskState::Pending.label(), "pendiente");
        assert_eq!(TaskState::InProgress.label(), "en progreso");
        assert_eq!(TaskState::Done.label(), "completada");

        let serialized = serde_json::to_string(&TaskState::InProgress).expect("serialize");
        assert_eq!(serialized, "\"en progreso\"");
    }

    #[test]
    fn task_round_trips_through_json() {
        let original = projects()
            .into_iter()
            .next()
            .expect("seed data has projects");
        let json = serde_json::to_string(&original).expect("serialize");
        let restored: super::Project = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored, original);
    }

    #[test]
    fn every_seed_task_satisfies_the_team_rule() {
        for project in projects() {
            for task in &project.tasks {
                assert!(task.validate_team().is_ok(), "task {} understaffed", task.id);
                assert!(
                    task.team.contains(&task.responsible),
                    "responsible missing from team on {}",
                    task.id
                );
            }
        }
    }

    #[test]
    fn understaffed_teams_are_rejected() {
        let mut task = projects()[0].tasks[0].clone();
        task.team.truncate(MIN_TEAM_SIZE - 1);
        assert_eq!(
            task.validate_team(),
            Err(RosterError::UnderstaffedTeam {
                task: task.id.clone(),
                members: MIN_TEAM_SIZE - 1,
            })
        );
    }

    #[test]
    fn filtering_returns_new_collections_and_drops_empty_projects() {
        let roster = projects();
        let in_progress = filter_by_state(&roster, TaskState::InProgress);

        for project in &in_progress {
            assert!(!project.tasks.is_empty());
            for task in &project.tasks {
                assert_eq!(task.state, TaskState::InProgress);
            }
        }

        // The source roster is untouched.
        assert_eq!(roster, projects());

        let done = filter_by_state(&roster, TaskState::Done);
        assert!(done.iter().all(|project| project.id != "carton"));
    }

    #[test]
    fn validation_opens_the_completion_window() {
        let roster = projects();
        let validated: &Task = &roster[0].tasks[2];
        assert!(validated.is_validated());
        assert_eq!(validated.completion_window_hours(), Some(5));

        let pending: &Task = &roster[0].tasks[0];
        assert!(!pending.is_validated());
        assert_eq!(pending.completion_window_hours(), None);
    }

    #[test]
    fn per_project_state_queries_match_the_global_filter() {
        let roster = projects();
        let composta = roster
            .iter()
            .find(|project| project.id == "composta")
            .expect("composta project exists");

        assert_eq!(composta.tasks_in_state(TaskState::Pending).count(), 3);
        assert_eq!(composta.tasks_in_state(TaskState::InProgress).count(), 1);
        assert_eq!(composta.tasks_in_state(TaskState::Done).count(), 1);
    }
}
