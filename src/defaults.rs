//! Seed state handed to clients that have never saved.

use serde_json::{json, Value};
use std::sync::Arc;

/// Field the server stamps on every saved document.
pub const LAST_SAVED_FIELD: &str = "lastSaved";

/// Build the default application state.
///
/// Called once at startup; the result is shared read-only for the lifetime
/// of the process.
pub fn default_state() -> Arc<Value> {
    Arc::new(json!({
        "userName": "Student",
        "dailyFocus": "",
        "focusIsSet": false,
        "dailyStudyGoal": 50,
        "theme": "light",
        "tasks": [],
        "tasksViewMode": "kanban",
        "tasksListSort": { "column": "dueDate", "direction": "asc" },
        // The front end replaces this with the current month on load.
        "tasksCalendarMonth": { "year": 2024, "month": 10 },
        "courses": [],
        "flashcardDecks": [],
        "currentDeckId": null,
        "studyMode": {
            "active": false,
            "deckId": null,
            "currentCardIndex": 0,
            "showingBack": false,
            "answerChecked": false
        },
        "pomodoroSettings": {
            "work": 25,
            "shortBreak": 5,
            "longBreak": 15
        },
        "pomodoro": {
            "mode": "work",
            "remainingSeconds": 1500,
            "isRunning": false,
            "startTime": null,
            "timerInterval": null
        },
        "studyHistory": [],
        "quickLinks": [
            { "id": "link1", "name": "Google Scholar", "url": "https://scholar.google.com", "icon": "📚" },
            { "id": "link2", "name": "GitHub", "url": "https://github.com", "icon": "💻" },
            { "id": "link3", "name": "YouTube", "url": "https://youtube.com", "icon": "🎥" },
            { "id": "link4", "name": "Stack Overflow", "url": "https://stackoverflow.com", "icon": "❓" }
        ],
        "unlockedAchievements": [],
        "musicPlaylist": [],
        "chartView": "daily",
        "currentModule": "dashboard",
        "currentCourseId": null,
        "lastSaved": 0
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_shape() {
        let state = default_state();

        assert!(state.is_object());
        assert_eq!(state["userName"], "Student");
        assert_eq!(state["pomodoro"]["remainingSeconds"], 1500);
        assert_eq!(state["quickLinks"].as_array().map(Vec::len), Some(4));
        assert_eq!(state[LAST_SAVED_FIELD], 0);
    }

    #[test]
    fn test_remaining_seconds_matches_work_setting() {
        let state = default_state();
        let work_minutes = state["pomodoroSettings"]["work"].as_u64().unwrap();

        assert_eq!(
            state["pomodoro"]["remainingSeconds"].as_u64(),
            Some(work_minutes * 60)
        );
    }
}
