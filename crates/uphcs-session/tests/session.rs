use jiff::Timestamp;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::json;
use uphcs_core::models::clinic::Clinic;
use uphcs_core::models::patient::Patient;
use uphcs_core::models::user::{Role, User};
use uphcs_session::access::check_dashboard_access;
use uphcs_session::clinic::ClinicContext;
use uphcs_session::error::SessionError;
use uphcs_session::jwt::{SessionClaims, check_token, decode_unverified};
use uphcs_session::routing::{LOGIN_ROUTE, RouteDecision, home_route, resolve};

fn token(claims: serde_json::Value) -> String {
    encode(&Header::default(), &claims, &EncodingKey::from_secret(b"server-side-secret")).unwrap()
}

fn clinic(id: i64, name: &str) -> Clinic {
    Clinic {
        id,
        name: name.to_string(),
    }
}

fn user(role: Role) -> User {
    User {
        id: 7,
        email: "sam@example.org".to_string(),
        name: "Sam Ortiz".to_string(),
        role,
        clinics: vec![clinic(3, "Main Street"), clinic(5, "Riverside")],
    }
}

fn patient_with(providers: serde_json::Value) -> Patient {
    serde_json::from_value(json!({
        "patientId": 42, "clinicId": 3, "clinicName": "Main Street", "mrn": "MRN-0042",
        "firstName": "Dana", "lastName": "Reyes", "dob": "1990-06-15",
        "enrollmentDate": "2024-01-10", "status": "A", "providers": providers
    }))
    .unwrap()
}

#[test]
fn decodes_claims_without_the_signing_key() {
    let claims = decode_unverified(&token(json!({ "id": 7, "exp": 4_102_444_800i64 }))).unwrap();
    assert_eq!(
        claims,
        SessionClaims {
            id: 7,
            exp: Some(4_102_444_800)
        }
    );

    let claims = decode_unverified(&token(json!({ "id": 9, "email": "x@example.org" }))).unwrap();
    assert_eq!(claims.exp, None);
}

#[test]
fn expired_token_is_rejected() {
    let now = Timestamp::from_second(1_700_000_000).unwrap();
    let expired = token(json!({ "id": 7, "exp": 1_699_999_999i64 }));
    assert!(matches!(check_token(&expired, now), Err(SessionError::TokenExpired)));

    let fresh = token(json!({ "id": 7, "exp": 1_700_003_600i64 }));
    assert_eq!(check_token(&fresh, now).unwrap().id, 7);
}

#[test]
fn garbage_and_empty_tokens() {
    let now = Timestamp::from_second(1_700_000_000).unwrap();
    assert!(matches!(check_token("", now), Err(SessionError::NotLoggedIn)));
    assert!(matches!(check_token("not.a.jwt", now), Err(SessionError::Jwt(_))));
}

#[test]
fn routes_per_role() {
    let admin = user(Role::Admin);
    assert_eq!(resolve(Some(&admin), "/admin"), RouteDecision::Allow);
    assert_eq!(resolve(Some(&admin), "/dashboard"), RouteDecision::Redirect("/admin"));

    let cm = user(Role::CareManager);
    assert_eq!(resolve(Some(&cm), "/patients/42"), RouteDecision::Allow);
    assert_eq!(resolve(Some(&cm), "/enrolled-patients"), RouteDecision::Allow);
    assert_eq!(resolve(Some(&cm), "/psych-dashboard"), RouteDecision::Redirect("/dashboard"));
    assert_eq!(resolve(Some(&cm), "/patientsx"), RouteDecision::Redirect("/dashboard"));

    let pc = user(Role::PsychiatricConsultant);
    assert_eq!(resolve(Some(&pc), "/psych-patients"), RouteDecision::Allow);
    assert_eq!(resolve(Some(&pc), "/patients/42"), RouteDecision::Allow);
    assert_eq!(resolve(Some(&pc), "/active-patients"), RouteDecision::Redirect("/psych-dashboard"));
    assert_eq!(home_route(Role::PsychiatricConsultant), "/psych-dashboard");
}

#[test]
fn anonymous_users_go_to_login() {
    assert_eq!(resolve(None, "/dashboard"), RouteDecision::Redirect(LOGIN_ROUTE));
    assert_eq!(resolve(None, "/"), RouteDecision::Allow);
}

#[test]
fn dashboard_access_requires_assignment() {
    let patient = patient_with(json!([
        { "id": 7, "providerType": "BHCM", "name": "Sam Ortiz" },
        { "id": 9, "providerType": "Psychiatric Consultant", "name": "Dr. Lee" }
    ]));

    assert!(check_dashboard_access(&user(Role::Admin), &patient).is_ok());
    assert!(check_dashboard_access(&user(Role::CareManager), &patient).is_ok());
    let err = check_dashboard_access(&user(Role::PsychiatricConsultant), &patient).unwrap_err();
    assert!(err.to_string().contains("Psychiatric Consultant"));

    let mut consultant = user(Role::PsychiatricConsultant);
    consultant.id = 9;
    assert!(check_dashboard_access(&consultant, &patient).is_ok());

    let unassigned = patient_with(json!([]));
    assert!(matches!(
        check_dashboard_access(&user(Role::CareManager), &unassigned),
        Err(SessionError::AccessDenied(_))
    ));
}

#[test]
fn clinic_selection_prefers_stored_then_first() {
    let u = user(Role::CareManager);
    let ctx = ClinicContext::initialize(&u, Some(&clinic(5, "Riverside")));
    assert_eq!(ctx.selected().map(|c| c.id), Some(5));

    let ctx = ClinicContext::initialize(&u, None);
    assert_eq!(ctx.selected().map(|c| c.id), Some(3));

    let ctx = ClinicContext::initialize(&u, Some(&clinic(99, "Closed")));
    assert_eq!(ctx.selected().map(|c| c.id), Some(3));

    let mut nobody = u.clone();
    nobody.clinics.clear();
    let ctx = ClinicContext::initialize(&nobody, None);
    assert!(matches!(ctx.require_selected(), Err(SessionError::NoClinics)));
}

#[test]
fn selecting_a_foreign_clinic_fails() {
    let mut ctx = ClinicContext::initialize(&user(Role::CareManager), None);
    assert_eq!(ctx.select(5).unwrap().name, "Riverside");
    assert!(matches!(ctx.select(8), Err(SessionError::NotAClinicMember(8))));
    assert_eq!(ctx.selected().map(|c| c.id), Some(5));
    ctx.clear();
    assert!(ctx.selected().is_none());
}
