use handyhub_config::JwtConfig;
use handyhub_auth::{Role, create_access_token, normalize_role, verify_token};
use uuid::Uuid;

fn get_test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        access_token_expiry: 3600,
    }
}

#[test]
fn test_create_access_token_all_roles() {
    let jwt_config = get_test_jwt_config();
    let user_id = Uuid::new_v4();

    for role in Role::ALL {
        let token = create_access_token(user_id, "test@example.com", role, &jwt_config).unwrap();
        assert!(!token.is_empty());
    }
}

#[test]
fn test_verify_token_round_trips_canonical_role() {
    let jwt_config = get_test_jwt_config();
    let user_id = Uuid::new_v4();

    for role in Role::ALL {
        let token = create_access_token(user_id, "test@example.com", role, &jwt_config).unwrap();
        let claims = verify_token(&token, &jwt_config).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.role, role.as_str());
        assert_eq!(normalize_role(Some(&claims.role)), role);
    }
}

#[test]
fn test_token_expiry_uses_config() {
    let jwt_config = get_test_jwt_config();
    let token =
        create_access_token(Uuid::new_v4(), "test@example.com", Role::User, &jwt_config).unwrap();
    let claims = verify_token(&token, &jwt_config).unwrap();

    assert_eq!(claims.exp - claims.iat, 3600);
}

#[test]
fn test_verify_token_wrong_secret() {
    let jwt_config = get_test_jwt_config();
    let token =
        create_access_token(Uuid::new_v4(), "test@example.com", Role::Admin, &jwt_config).unwrap();

    let other = JwtConfig {
        secret: "another_secret".to_string(),
        ..get_test_jwt_config()
    };
    let err = verify_token(&token, &other).unwrap_err();

    assert_eq!(err.status.as_u16(), 401);
}

#[test]
fn test_verify_token_malformed() {
    let jwt_config = get_test_jwt_config();

    for token in ["", "invalid", "a.b.c"] {
        assert!(verify_token(token, &jwt_config).is_err(), "{token}");
    }
}
