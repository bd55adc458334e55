//! Integration scenarios for the placement workflow engine.
//!
//! Everything here drives the public service facade and the HTTP router the
//! way an embedding binary would, without reaching into private modules.

mod common {
    use std::sync::Arc;

    use campus_placement::workflows::placement::{
        Cgpa, Job, JobId, JobRepository, JobStatus, MemoryRecordStore, MinCgpa,
        PlacementServices, RecruiterProfile, RoleProfile, StudentProfile, User, UserId,
        UserRepository,
    };

    pub(super) fn seeded_services() -> PlacementServices<MemoryRecordStore> {
        let store = Arc::new(MemoryRecordStore::new());

        store
            .insert_user(User {
                id: UserId("rec-lee".to_string()),
                full_name: "Priya Lee".to_string(),
                email: "priya.lee@nimbusworks.example".to_string(),
                phone: None,
                profile: RoleProfile::Recruiter(RecruiterProfile {
                    company_name: "Nimbus Works".to_string(),
                    designation: "Hiring Manager".to_string(),
                }),
            })
            .expect("seed recruiter");
        store
            .insert_user(User {
                id: UserId("stu-kiran".to_string()),
                full_name: "Kiran Rao".to_string(),
                email: "kiran.rao@campus.example".to_string(),
                phone: None,
                profile: RoleProfile::Student(StudentProfile {
                    department: "Computer Science".to_string(),
                    cgpa: Cgpa::Recorded(8.2),
                }),
            })
            .expect("seed student");
        store
            .insert_job(Job {
                id: JobId("job-backend".to_string()),
                posted_by: UserId("rec-lee".to_string()),
                title: "Backend Engineer".to_string(),
                description: "Platform team".to_string(),
                min_cgpa: MinCgpa::AtLeast(0.7),
                status: JobStatus::Active,
            })
            .expect("seed job");

        PlacementServices::new(store)
    }

    pub(super) fn student() -> UserId {
        UserId("stu-kiran".to_string())
    }

    pub(super) fn posting() -> JobId {
        JobId("job-backend".to_string())
    }
}

mod pipeline {
    use super::common::*;
    use campus_placement::workflows::placement::{
        ApplicationStatus, IneligibilityReason, InterviewResult, InterviewStatus,
        InterviewUpdate, PlacementError,
    };
    use chrono::{Duration, Utc};

    #[test]
    fn application_travels_from_submission_to_offer() {
        let services = seeded_services();

        let eligibility = services
            .applications
            .check_eligibility(&student(), &posting())
            .expect("eligibility check");
        assert!(eligibility.is_eligible());

        let application = services
            .applications
            .create(&student(), &posting())
            .expect("application");
        assert_eq!(application.status, ApplicationStatus::Submitted);

        services
            .applications
            .set_status(&application.id, ApplicationStatus::UnderReview)
            .expect("review");
        services
            .applications
            .set_status(&application.id, ApplicationStatus::Interview)
            .expect("interview stage");

        let technical = services
            .interviews
            .schedule(
                &application.id,
                "Technical".to_string(),
                Utc::now() + Duration::days(2),
                "Placement cell".to_string(),
            )
            .expect("technical round");
        services
            .interviews
            .update(
                &technical.id,
                InterviewUpdate {
                    status: Some(InterviewStatus::Completed),
                    result: Some(InterviewResult::Passed),
                    further_rounds: true,
                    ..InterviewUpdate::default()
                },
            )
            .expect("technical pass");

        let hr = services
            .interviews
            .schedule(
                &application.id,
                "HR".to_string(),
                Utc::now() + Duration::days(5),
                "Placement cell".to_string(),
            )
            .expect("hr round");
        services
            .interviews
            .update(
                &hr.id,
                InterviewUpdate {
                    status: Some(InterviewStatus::Completed),
                    result: Some(InterviewResult::Passed),
                    ..InterviewUpdate::default()
                },
            )
            .expect("final pass");

        let settled = services
            .applications
            .get(&application.id)
            .expect("final read");
        assert_eq!(settled.status, ApplicationStatus::Offered);

        let rounds = services
            .interviews
            .by_application(&application.id)
            .expect("round listing");
        assert_eq!(rounds.len(), 2);
    }

    #[test]
    fn failed_round_closes_the_application() {
        let services = seeded_services();
        let application = services
            .applications
            .create(&student(), &posting())
            .expect("application");
        services
            .applications
            .set_status(&application.id, ApplicationStatus::UnderReview)
            .expect("review");
        services
            .applications
            .set_status(&application.id, ApplicationStatus::Interview)
            .expect("interview stage");

        let round = services
            .interviews
            .schedule(
                &application.id,
                "Technical".to_string(),
                Utc::now() + Duration::days(1),
                "Placement cell".to_string(),
            )
            .expect("round");
        services
            .interviews
            .update(
                &round.id,
                InterviewUpdate {
                    status: Some(InterviewStatus::Completed),
                    result: Some(InterviewResult::Failed),
                    feedback: Some("Did not clear the coding bar".to_string()),
                    ..InterviewUpdate::default()
                },
            )
            .expect("failure recorded");

        let settled = services
            .applications
            .get(&application.id)
            .expect("final read");
        assert_eq!(settled.status, ApplicationStatus::Rejected);

        // The pair stays blocked: REJECTED is terminal but not withdrawn.
        match services.applications.create(&student(), &posting()) {
            Err(PlacementError::Ineligible(IneligibilityReason::AlreadyApplied)) => {}
            other => panic!("expected ALREADY_APPLIED, got {other:?}"),
        }
    }

    #[test]
    fn withdrawal_reopens_the_pair() {
        let services = seeded_services();
        let application = services
            .applications
            .create(&student(), &posting())
            .expect("application");
        services
            .applications
            .set_status(&application.id, ApplicationStatus::Withdrawn)
            .expect("withdrawal");

        let fresh = services
            .applications
            .create(&student(), &posting())
            .expect("fresh application");
        assert_eq!(fresh.status, ApplicationStatus::Submitted);
    }
}

mod routing {
    use super::common::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use campus_placement::workflows::placement::placement_router;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    #[tokio::test]
    async fn application_submission_round_trips_over_http() {
        let router = placement_router(seeded_services());

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/placement/applications")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::to_vec(&json!({
                            "student_id": "stu-kiran",
                            "job_id": "job-backend",
                        }))
                        .expect("serialize request"),
                    ))
                    .expect("request"),
            )
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::CREATED);

        let listed = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/v1/placement/applications/student/stu-kiran")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");
        assert_eq!(listed.status(), StatusCode::OK);

        let body = to_bytes(listed.into_body(), 1024 * 1024)
            .await
            .expect("read body");
        let payload: Value = serde_json::from_slice(&body).expect("json payload");
        let applications = payload.as_array().expect("application list");
        assert_eq!(applications.len(), 1);
        assert_eq!(
            applications[0].get("status"),
            Some(&json!("SUBMITTED"))
        );
    }

    #[tokio::test]
    async fn unknown_application_reads_as_missing() {
        let router = placement_router(seeded_services());

        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/v1/placement/applications/app-ghost")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
