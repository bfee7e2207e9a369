use crate::error::ServiceError;

#[test]
fn test_status_codes_follow_classification_table() {
    let cases = [
        (ServiceError::Configuration("DB_HOST unset".into()), 500),
        (ServiceError::CredentialsNotFound("no secret".into()), 500),
        (ServiceError::InvalidCredentials("bad payload".into()), 500),
        (ServiceError::ConnectionUnavailable("refused".into()), 503),
        (ServiceError::Connection("bad database".into()), 500),
        (ServiceError::Query("syntax error".into()), 500),
        (ServiceError::BadRequest("bad body".into()), 400),
        (ServiceError::UnsupportedMethod("PUT".into()), 405),
        (ServiceError::Internal("boom".into()), 500),
    ];
    for (err, expected) in cases {
        assert_eq!(err.status_code(), expected, "wrong status for {:?}", err);
    }
}

#[test]
fn test_credential_variants_share_one_kind() {
    assert_eq!(
        ServiceError::CredentialsNotFound("x".into()).kind(),
        "CREDENTIALS_ERROR"
    );
    assert_eq!(
        ServiceError::InvalidCredentials("x".into()).kind(),
        "CREDENTIALS_ERROR"
    );
}

#[test]
fn test_public_messages_never_include_internal_detail() {
    let secret_detail = "connection to server at 10.0.3.17 failed";
    let errors = [
        ServiceError::Configuration(secret_detail.into()),
        ServiceError::CredentialsNotFound(secret_detail.into()),
        ServiceError::InvalidCredentials(secret_detail.into()),
        ServiceError::ConnectionUnavailable(secret_detail.into()),
        ServiceError::Connection(secret_detail.into()),
        ServiceError::Query(secret_detail.into()),
        ServiceError::BadRequest(secret_detail.into()),
        ServiceError::UnsupportedMethod(secret_detail.into()),
        ServiceError::Internal(secret_detail.into()),
    ];
    for err in errors {
        assert!(
            !err.public_message().contains("10.0.3.17"),
            "public message leaked detail for {:?}",
            err
        );
    }
}

#[test]
fn test_unavailable_subtype_maps_to_service_unavailable() {
    let err = ServiceError::ConnectionUnavailable("connection refused".into());
    assert_eq!(err.status_code(), 503);
    assert_eq!(err.public_message(), "Database connection failed");
}
