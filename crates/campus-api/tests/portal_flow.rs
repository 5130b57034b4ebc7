//! End-to-end: a student signs up, logs in, applies for a task and chats,
//! against a SQLite-backed medium that is reopened halfway through.

use std::path::PathBuf;
use std::sync::Arc;

use campus_api::auto_reply::{AUTO_REPLY_AUTHOR, AUTO_REPLY_CHANNEL};
use campus_api::{CampusApi, Latency};
use campus_db::{Database, KeyValueStore, SeedData, SessionStore, Storage};
use campus_types::api::{ApplicationRequest, SendMessageRequest, StudentSignup};

fn db_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("campus_portal_flow_{}", std::process::id()));
    let _ = std::fs::create_dir_all(&dir);
    let path = dir.join(name);
    let _ = std::fs::remove_file(&path);
    path
}

fn open(path: &PathBuf) -> (Arc<dyn KeyValueStore>, CampusApi) {
    let medium: Arc<dyn KeyValueStore> = Arc::new(Database::open(path).unwrap());
    let storage = Storage::new(medium.clone(), SeedData::builtin().unwrap());
    (medium, CampusApi::new(storage, Latency::standard()))
}

#[tokio::test(start_paused = true)]
async fn student_journey_survives_reopen() {
    let path = db_path("journey.db");
    let (medium, api) = open(&path);

    let signup = api
        .signup_student(StudentSignup {
            full_name: "Kabir Rao".to_string(),
            sap_id: "60004221234".to_string(),
            branch: "Computer Science".to_string(),
            year: "SE".to_string(),
            phone: "9820012121".to_string(),
            email: "kabir@campus.edu".to_string(),
            password: "kabir-pass".to_string(),
            linkedin: String::new(),
            github: String::new(),
            bio: String::new(),
            skills: vec!["Rust".to_string()],
            interests: vec![],
        })
        .await
        .unwrap();
    assert!(signup.success);

    let login = api.login("kabir@campus.edu", "kabir-pass").await.unwrap();
    let user = login.data.unwrap();
    let sessions = SessionStore::new(Some(medium));
    sessions.save(&user).unwrap();

    let applied = api
        .submit_application(ApplicationRequest {
            student_id: user.id().to_string(),
            task_id: "task-hackathon-ops".to_string(),
            motivation: "Ran two college fests.".to_string(),
            use_profile_resume: false,
        })
        .await
        .unwrap();
    assert!(applied.success);
    drop(api);

    let (medium, api) = open(&path);
    let sessions = SessionStore::new(Some(medium));
    assert_eq!(sessions.current().unwrap().as_ref(), Some(&user));

    let explorer = api.get_tasks_for_explorer(user.id()).await.unwrap();
    let hackathon = explorer
        .iter()
        .find(|l| l.task.id == "task-hackathon-ops")
        .unwrap();
    assert_eq!(hackathon.has_applied, Some(true));
    assert_eq!(hackathon.posted_by_name, "Google Developer Student Club");

    let again = api
        .submit_application(ApplicationRequest {
            student_id: user.id().to_string(),
            task_id: "task-hackathon-ops".to_string(),
            motivation: "Second try.".to_string(),
            use_profile_resume: true,
        })
        .await
        .unwrap();
    assert!(!again.success);
}

#[tokio::test(start_paused = true)]
async fn auto_reply_lands_in_sqlite() {
    let path = db_path("auto_reply.db");
    let (_, api) = open(&path);

    api.send_message(SendMessageRequest {
        channel_id: AUTO_REPLY_CHANNEL.to_string(),
        author_id: "student-aarav".to_string(),
        content: "Good morning sir, how are you?".to_string(),
        image_url: None,
    })
    .await
    .unwrap();
    api.auto_reply().wait_idle().await;
    drop(api);

    let (_, api) = open(&path);
    let messages = api.get_messages_for_channel(AUTO_REPLY_CHANNEL).await.unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].author_id, AUTO_REPLY_AUTHOR);
}
