use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;

use crate::models::Activity;

/// Handle shared by the router and every request handler. List takes a read
/// lock; signup and unregister take the write lock around their whole
/// check-then-mutate step, so overlapping requests cannot interleave.
pub type SharedDirectory = Arc<RwLock<ActivityDirectory>>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("Activity not found")]
    ActivityNotFound,
    #[error("Student already signed up for this activity")]
    AlreadySignedUp,
    #[error("Student not signed up for this activity")]
    NotSignedUp,
}

/// The full catalog, keyed by display name. Activities are never created or
/// removed at runtime; the only mutation paths are signup and unregister on
/// a participant list.
#[derive(Debug, Default)]
pub struct ActivityDirectory {
    activities: BTreeMap<String, Activity>,
}

impl ActivityDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog every process starts with.
    pub fn with_default_catalog() -> Self {
        let mut dir = ActivityDirectory::new();
        dir.insert(
            "Chess Club",
            Activity::new(
                "Learn strategies and compete in chess tournaments",
                "Fridays, 3:30 PM - 5:00 PM",
                12,
                &["michael@mergington.edu", "daniel@mergington.edu"],
            ),
        );
        dir.insert(
            "Programming Class",
            Activity::new(
                "Learn programming fundamentals and build software projects",
                "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
                20,
                &["emma@mergington.edu", "sophia@mergington.edu"],
            ),
        );
        dir.insert(
            "Gym Class",
            Activity::new(
                "Physical education and sports activities",
                "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM",
                30,
                &["john@mergington.edu", "olivia@mergington.edu"],
            ),
        );
        dir.insert(
            "Soccer Team",
            Activity::new(
                "Competitive soccer training and matches",
                "Mondays, Wednesdays, 4:00 PM - 6:00 PM",
                18,
                &["ryan@mergington.edu", "lisa@mergington.edu"],
            ),
        );
        dir.insert(
            "Basketball Club",
            Activity::new(
                "Pick-up games, drills, and intramural tournaments",
                "Tuesdays and Thursdays, 5:00 PM - 7:00 PM",
                15,
                &["mark@mergington.edu", "nina@mergington.edu"],
            ),
        );
        dir.insert(
            "Art Club",
            Activity::new(
                "Explore drawing, painting, and mixed media projects",
                "Wednesdays, 3:30 PM - 5:00 PM",
                20,
                &["hazel@mergington.edu", "aaron@mergington.edu"],
            ),
        );
        dir.insert(
            "Theater Club",
            Activity::new(
                "Acting, stagecraft, and production of school plays",
                "Fridays, 4:00 PM - 6:00 PM",
                25,
                &["isabella@mergington.edu", "tom@mergington.edu"],
            ),
        );
        dir.insert(
            "Debate Team",
            Activity::new(
                "Practice argumentation, public speaking, and competitions",
                "Mondays and Thursdays, 4:00 PM - 5:30 PM",
                16,
                &["sara@mergington.edu", "leo@mergington.edu"],
            ),
        );
        dir.insert(
            "Science Olympiad",
            Activity::new(
                "Hands-on STEM challenges and interschool competitions",
                "Tuesdays, 3:30 PM - 5:30 PM",
                24,
                &["maria@mergington.edu", "kevin@mergington.edu"],
            ),
        );
        dir
    }

    /// Seeding and test fixtures only; no HTTP surface creates activities.
    pub fn insert(&mut self, name: &str, activity: Activity) {
        self.activities.insert(name.to_string(), activity);
    }

    pub fn list(&self) -> &BTreeMap<String, Activity> {
        &self.activities
    }

    /// Adds `email` to the activity's roster. The name must match a
    /// directory key exactly (case-sensitive, spaces preserved).
    /// `max_participants` is displayed, not enforced: signups past capacity
    /// are accepted.
    pub fn signup(&mut self, activity_name: &str, email: &str) -> Result<(), DirectoryError> {
        let activity = self
            .activities
            .get_mut(activity_name)
            .ok_or(DirectoryError::ActivityNotFound)?;

        if activity.participants.iter().any(|p| p == email) {
            return Err(DirectoryError::AlreadySignedUp);
        }

        activity.participants.push(email.to_string());
        Ok(())
    }

    /// Removes `email` from the activity's roster.
    pub fn unregister(&mut self, activity_name: &str, email: &str) -> Result<(), DirectoryError> {
        let activity = self
            .activities
            .get_mut(activity_name)
            .ok_or(DirectoryError::ActivityNotFound)?;

        let Some(pos) = activity.participants.iter().position(|p| p == email) else {
            return Err(DirectoryError::NotSignedUp);
        };

        activity.participants.remove(pos);
        Ok(())
    }

    pub fn into_shared(self) -> SharedDirectory {
        Arc::new(RwLock::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chess_only() -> ActivityDirectory {
        let mut dir = ActivityDirectory::new();
        dir.insert(
            "Chess Club",
            Activity::new(
                "Learn strategies and compete in chess tournaments",
                "Fridays, 3:30 PM - 5:00 PM",
                12,
                &["michael@mergington.edu", "daniel@mergington.edu"],
            ),
        );
        dir
    }

    #[test]
    fn default_catalog_holds_nine_activities() {
        let dir = ActivityDirectory::with_default_catalog();
        assert_eq!(dir.list().len(), 9);
        assert!(dir.list().contains_key("Chess Club"));
        assert!(dir.list().contains_key("Science Olympiad"));
    }

    #[test]
    fn signup_appends_in_order() {
        let mut dir = chess_only();
        dir.signup("Chess Club", "newstudent@mergington.edu").unwrap();
        let roster = &dir.list()["Chess Club"].participants;
        assert_eq!(
            roster,
            &vec![
                "michael@mergington.edu".to_string(),
                "daniel@mergington.edu".to_string(),
                "newstudent@mergington.edu".to_string(),
            ]
        );
    }

    #[test]
    fn signup_unknown_activity_fails() {
        let mut dir = chess_only();
        let err = dir
            .signup("Nonexistent Club", "student@mergington.edu")
            .unwrap_err();
        assert_eq!(err, DirectoryError::ActivityNotFound);
    }

    #[test]
    fn signup_duplicate_fails_and_roster_is_unchanged() {
        let mut dir = chess_only();
        let err = dir
            .signup("Chess Club", "michael@mergington.edu")
            .unwrap_err();
        assert_eq!(err, DirectoryError::AlreadySignedUp);
        assert_eq!(dir.list()["Chess Club"].participants.len(), 2);
    }

    #[test]
    fn activity_names_match_exactly() {
        let mut dir = chess_only();
        let err = dir
            .signup("chess club", "student@mergington.edu")
            .unwrap_err();
        assert_eq!(err, DirectoryError::ActivityNotFound);
    }

    #[test]
    fn unregister_removes_the_email() {
        let mut dir = chess_only();
        dir.unregister("Chess Club", "michael@mergington.edu")
            .unwrap();
        let roster = &dir.list()["Chess Club"].participants;
        assert_eq!(roster, &vec!["daniel@mergington.edu".to_string()]);
    }

    #[test]
    fn unregister_unknown_activity_fails() {
        let mut dir = chess_only();
        let err = dir
            .unregister("Nonexistent Club", "michael@mergington.edu")
            .unwrap_err();
        assert_eq!(err, DirectoryError::ActivityNotFound);
    }

    #[test]
    fn unregister_missing_email_fails_and_roster_is_unchanged() {
        let mut dir = chess_only();
        let err = dir
            .unregister("Chess Club", "notsignedup@mergington.edu")
            .unwrap_err();
        assert_eq!(err, DirectoryError::NotSignedUp);
        assert_eq!(dir.list()["Chess Club"].participants.len(), 2);
    }

    #[test]
    fn signup_then_unregister_restores_the_roster() {
        let mut dir = chess_only();
        let before = dir.list()["Chess Club"].participants.clone();
        dir.signup("Chess Club", "workflow@mergington.edu").unwrap();
        dir.unregister("Chess Club", "workflow@mergington.edu")
            .unwrap();
        assert_eq!(dir.list()["Chess Club"].participants, before);
    }

    #[test]
    fn capacity_is_not_enforced() {
        let mut dir = ActivityDirectory::new();
        dir.insert(
            "Tiny Club",
            Activity::new("Small on purpose", "Mondays", 1, &[]),
        );
        dir.signup("Tiny Club", "one@mergington.edu").unwrap();
        dir.signup("Tiny Club", "two@mergington.edu").unwrap();
        assert_eq!(dir.list()["Tiny Club"].participants.len(), 2);
    }
}
