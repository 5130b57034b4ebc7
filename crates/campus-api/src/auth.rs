use tracing::{debug, info};

use campus_db::Storage;
use campus_types::api::{CommitteeSignup, FacultySignup, Outcome, StudentSignup};
use campus_types::models::{CommitteeAccount, Faculty, Student, User};

use crate::latency::simulate;
use crate::{ApiResult, CampusApi, blocking, next_id};

impl CampusApi {
    /// Plaintext match on both fields. A refusal never says which one was wrong.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<Outcome<User>> {
        simulate(self.latency.auth).await;

        let email = email.to_string();
        let password = password.to_string();
        let user = blocking(&self.storage, move |storage| {
            let users: Vec<User> = storage.collection()?;
            Ok(users
                .into_iter()
                .find(|u| u.email() == email && u.password() == password))
        })
        .await?;

        Ok(match user {
            Some(user) => {
                debug!("Login accepted for {}", user.id());
                Outcome::accepted("Login successful!", user)
            }
            None => Outcome::refused("Invalid email or password."),
        })
    }

    /// Refuses a taken email or SAP id. Field validation is the caller's job.
    pub async fn signup_student(&self, req: StudentSignup) -> ApiResult<Outcome<User>> {
        simulate(self.latency.auth).await;

        blocking(&self.storage, move |storage| {
            let mut users: Vec<User> = storage.collection()?;
            if users
                .iter()
                .any(|u| u.email() == req.email || u.sap_id() == Some(req.sap_id.as_str()))
            {
                return Ok(Outcome::refused(
                    "A user with that Email or SAP ID already exists.",
                ));
            }

            let user = User::Student(Student {
                id: next_id("student"),
                email: req.email,
                password: req.password,
                full_name: req.full_name,
                sap_id: req.sap_id,
                branch: req.branch,
                year: req.year,
                phone: req.phone,
                linkedin: req.linkedin,
                github: req.github,
                bio: req.bio,
                skills: req.skills,
                interests: req.interests,
                resume_url: None,
                extra: Default::default(),
            });
            register(storage, &mut users, user, "Signup successful! Please log in.")
        })
        .await
    }

    pub async fn signup_faculty(&self, req: FacultySignup) -> ApiResult<Outcome<User>> {
        simulate(self.latency.auth).await;

        blocking(&self.storage, move |storage| {
            let mut users: Vec<User> = storage.collection()?;
            if users.iter().any(|u| u.email() == req.email) {
                return Ok(Outcome::refused("A user with that Email already exists."));
            }

            let user = User::Faculty(Faculty {
                id: next_id("faculty"),
                email: req.email,
                password: req.password,
                full_name: req.full_name,
                branch: req.branch,
                phone: req.phone,
                designation: req.designation,
                extra: Default::default(),
            });
            register(
                storage,
                &mut users,
                user,
                "Faculty account created! Please log in.",
            )
        })
        .await
    }

    pub async fn signup_committee(&self, req: CommitteeSignup) -> ApiResult<Outcome<User>> {
        simulate(self.latency.auth).await;

        blocking(&self.storage, move |storage| {
            let mut users: Vec<User> = storage.collection()?;
            if users.iter().any(|u| u.email() == req.email) {
                return Ok(Outcome::refused(
                    "A committee with that Email already exists.",
                ));
            }

            let user = User::Committee(CommitteeAccount {
                id: next_id("committee"),
                email: req.email,
                password: req.password,
                name: req.name,
                branch: req.branch,
                description: req.description,
                phone: req.phone,
                extra: Default::default(),
            });
            register(
                storage,
                &mut users,
                user,
                "Committee account created! Please log in.",
            )
        })
        .await
    }
}

fn register(
    storage: &Storage,
    users: &mut Vec<User>,
    user: User,
    message: &str,
) -> anyhow::Result<Outcome<User>> {
    users.push(user.clone());
    storage.persist(users)?;

    info!("Account created: {} ({:?})", user.id(), user.role());
    Ok(Outcome::accepted(message, user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;
    use campus_db::{KeyValueStore, SeedData};
    use campus_types::models::Role;
    use serde_json::{Value, json};

    fn student(email: &str, sap_id: &str) -> StudentSignup {
        StudentSignup {
            full_name: "Neha Joshi".to_string(),
            sap_id: sap_id.to_string(),
            branch: "Electronics".to_string(),
            year: "FE".to_string(),
            phone: "9820000000".to_string(),
            email: email.to_string(),
            password: "hunter22".to_string(),
            linkedin: String::new(),
            github: String::new(),
            bio: String::new(),
            skills: vec!["C".to_string()],
            interests: vec![],
        }
    }

    #[tokio::test(start_paused = true)]
    async fn login_matches_both_fields() {
        let (_, api) = testing::api();

        let ok = api.login("anil.mehta@campus.edu", "faculty123").await.unwrap();
        assert!(ok.success);
        assert_eq!(ok.data.unwrap().id(), "faculty-mehta");

        let wrong_password = api.login("anil.mehta@campus.edu", "nope").await.unwrap();
        let wrong_email = api.login("nobody@campus.edu", "faculty123").await.unwrap();
        assert!(!wrong_password.success);
        assert!(!wrong_email.success);
        assert_eq!(wrong_password.message, wrong_email.message);
    }

    #[tokio::test(start_paused = true)]
    async fn student_signup_persists_and_allows_login() {
        let (_, api) = testing::api();

        let outcome = api
            .signup_student(student("neha@campus.edu", "60004229999"))
            .await
            .unwrap();
        assert!(outcome.success);
        let user = outcome.data.unwrap();
        assert!(user.id().starts_with("student-"));
        assert_eq!(user.role(), Role::Student);

        let login = api.login("neha@campus.edu", "hunter22").await.unwrap();
        assert_eq!(login.data, Some(user));
    }

    #[tokio::test(start_paused = true)]
    async fn duplicate_email_is_refused_even_with_new_sap_id() {
        let (_, api) = testing::api();

        assert!(api
            .signup_student(student("neha@campus.edu", "60004229999"))
            .await
            .unwrap()
            .success);
        let second = api
            .signup_student(student("neha@campus.edu", "60004228888"))
            .await
            .unwrap();
        assert!(!second.success);
        assert!(second.data.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn duplicate_sap_id_is_refused_even_with_new_email() {
        let (_, api) = testing::api();

        let outcome = api
            .signup_student(student("someone.else@campus.edu", "60004220001"))
            .await
            .unwrap();
        assert!(!outcome.success);
        assert_eq!(
            outcome.message,
            "A user with that Email or SAP ID already exists."
        );
    }

    #[tokio::test(start_paused = true)]
    async fn faculty_and_committee_signups_check_email_only() {
        let (_, api) = testing::api();

        let taken = api
            .signup_faculty(FacultySignup {
                full_name: "Dr. Clone".to_string(),
                branch: "Computer Science".to_string(),
                phone: String::new(),
                designation: "Lecturer".to_string(),
                email: "anil.mehta@campus.edu".to_string(),
                password: "x".to_string(),
            })
            .await
            .unwrap();
        assert!(!taken.success);

        let created = api
            .signup_committee(CommitteeSignup {
                name: "Robotics Club".to_string(),
                branch: "all".to_string(),
                description: "Bots.".to_string(),
                phone: String::new(),
                email: "robotics@campus.edu".to_string(),
                password: "x".to_string(),
            })
            .await
            .unwrap();
        assert!(created.success);
        assert!(created.data.unwrap().id().starts_with("committee-"));
    }

    #[tokio::test(start_paused = true)]
    async fn sparse_stored_user_does_not_hide_the_others() {
        let (medium, api) = testing::api();
        let mut stored: Vec<Value> = SeedData::builtin()
            .unwrap()
            .users
            .iter()
            .map(|u| serde_json::to_value(u).unwrap())
            .collect();
        stored.push(json!({
            "id": "faculty-legacy",
            "role": "faculty",
            "email": "legacy@campus.edu",
            "password": "legacy-pass",
            "name": "Dr. Legacy"
        }));
        stored.push(json!({
            "id": "student-kept",
            "role": "student",
            "email": "kept@campus.edu",
            "password": "kept-pass",
            "fullName": "Kept Student",
            "sapId": "60004227777"
        }));
        medium
            .set("users", &serde_json::to_string(&stored).unwrap())
            .unwrap();

        assert!(api.login("legacy@campus.edu", "legacy-pass").await.unwrap().success);
        assert!(api.login("kept@campus.edu", "kept-pass").await.unwrap().success);

        let created = api
            .signup_faculty(FacultySignup {
                full_name: "Dr. New".to_string(),
                branch: "Mechanical".to_string(),
                phone: String::new(),
                designation: "Lecturer".to_string(),
                email: "new@campus.edu".to_string(),
                password: "x".to_string(),
            })
            .await
            .unwrap();
        assert!(created.success);

        let raw = medium.get("users").unwrap().unwrap();
        let after: Vec<Value> = serde_json::from_str(&raw).unwrap();
        assert_eq!(after.len(), stored.len() + 1);
        for id in ["faculty-legacy", "student-kept", "student-aarav"] {
            assert!(after.iter().any(|u| u["id"] == json!(id)), "{} lost", id);
        }
    }
}
