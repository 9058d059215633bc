use super::*;
use serde_json::json;

// =============================================================
// User
// =============================================================

#[test]
fn user_accepts_numeric_id_and_minimal_fields() {
    let user: User = serde_json::from_value(json!({ "id": 1, "username": "a" })).unwrap();
    assert_eq!(user.id, "1");
    assert_eq!(user.username, "a");
    assert_eq!(user.role, Role::Buyer);
    assert!(user.email.is_empty());
    assert!(user.seller_profile.is_none());
}

#[test]
fn user_accepts_string_id_and_profiles() {
    let user: User = serde_json::from_value(json!({
        "id": "65f0c0ffee",
        "username": "supply_co",
        "email": "supply@gmail.com",
        "whatsapp_number": "+923001234567",
        "role": "supplier",
        "supplierProfile": { "company": "Supply Co" }
    }))
    .unwrap();
    assert_eq!(user.id, "65f0c0ffee");
    assert_eq!(user.role, Role::Supplier);
    assert_eq!(user.supplier_profile, Some(json!({ "company": "Supply Co" })));
    assert!(user.seller_profile.is_none());
}

#[test]
fn user_with_unknown_role_still_decodes() {
    let user: User = serde_json::from_value(json!({ "id": 1, "username": "a", "role": "admin" })).unwrap();
    assert_eq!(user.role, Role::Other);
}

#[test]
fn user_null_identity_fields_read_as_absent() {
    let user: User = serde_json::from_value(json!({
        "id": 1,
        "username": "a",
        "role": null,
        "email": null,
        "whatsapp_number": null
    }))
    .unwrap();
    assert_eq!(user.role, Role::Buyer);
    assert!(user.email.is_empty());
    assert!(user.whatsapp_number.is_empty());
}

#[test]
fn verify_response_with_unknown_role_keeps_user() {
    let resp: VerifyResponse =
        serde_json::from_str(r#"{"user":{"id":"9","username":"staff1","role":"admin","email":null}}"#).unwrap();
    assert_eq!(resp.user.username, "staff1");
    assert_eq!(resp.user.role, Role::Other);
}

#[test]
fn user_rejects_missing_or_fractional_id() {
    assert!(serde_json::from_value::<User>(json!({ "username": "a" })).is_err());
    assert!(serde_json::from_value::<User>(json!({ "id": 1.5, "username": "a" })).is_err());
    assert!(serde_json::from_value::<User>(json!({ "id": "", "username": "a" })).is_err());
}

#[test]
fn user_serializes_profiles_in_camel_case() {
    let user = User {
        id: "7".to_owned(),
        username: "seller1".to_owned(),
        email: String::new(),
        whatsapp_number: String::new(),
        role: Role::Seller,
        seller_profile: Some(json!({ "shop": "s" })),
        supplier_profile: None,
    };
    let value = serde_json::to_value(&user).unwrap();
    assert_eq!(value["sellerProfile"], json!({ "shop": "s" }));
    assert!(value.get("supplierProfile").is_none());
    assert_eq!(value["role"], "seller");
}

// =============================================================
// Requests
// =============================================================

#[test]
fn signup_request_uses_snake_case_whatsapp_and_lowercase_role() {
    let body = serde_json::to_value(SignupRequest {
        username: "alice1".to_owned(),
        email: "alice@gmail.com".to_owned(),
        password: "Abcdef1!".to_owned(),
        whatsapp_number: "+923001234567".to_owned(),
        role: Role::Supplier,
    })
    .unwrap();
    assert_eq!(body["whatsapp_number"], "+923001234567");
    assert_eq!(body["role"], "supplier");
}

#[test]
fn reset_request_uses_camel_case_password_key() {
    let body = serde_json::to_value(ResetPasswordRequest {
        token: "xyz".to_owned(),
        new_password: "Abcdef1!".to_owned(),
    })
    .unwrap();
    assert_eq!(body, json!({ "token": "xyz", "newPassword": "Abcdef1!" }));
}

// =============================================================
// Responses
// =============================================================

#[test]
fn auth_response_parses_token_and_user() {
    let resp: AuthResponse =
        serde_json::from_value(json!({ "token": "t1", "user": { "id": 1, "username": "a" } })).unwrap();
    assert_eq!(resp.token, "t1");
    assert_eq!(resp.user.username, "a");
}

#[test]
fn message_body_tolerates_missing_message() {
    let body: MessageBody = serde_json::from_str("{}").unwrap();
    assert_eq!(body.message, None);
}

#[test]
fn role_parse_matches_wire_names() {
    for role in [Role::Buyer, Role::Seller, Role::Supplier] {
        assert_eq!(Role::parse(role.as_str()), Some(role));
    }
    assert_eq!(Role::parse("admin"), None);
    assert_eq!(Role::parse(Role::Other.as_str()), None);
}
