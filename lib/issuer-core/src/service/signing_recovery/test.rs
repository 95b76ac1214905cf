use std::sync::Arc;

use time::OffsetDateTime;
use uuid::Uuid;

use super::*;
use crate::model::credential_procedure::{CredentialProcedure, DeferredCredentialMetadata};
use crate::provider::notification::MockNotificationProvider;
use crate::repository::credential_procedure_repository::MockCredentialProcedureRepository;
use crate::repository::deferred_credential_metadata_repository::MockDeferredCredentialMetadataRepository;

fn procedure(procedure_id: ProcedureId) -> CredentialProcedure {
    CredentialProcedure {
        procedure_id,
        organization_identifier: "VATES-B12345678".to_string(),
        credential_status: CredentialStatus::Issued,
        operation_mode: OperationMode::Sync,
        updated_by: "operator@example.com".to_string(),
        updated_at: OffsetDateTime::now_utc(),
    }
}

fn metadata(procedure_id: ProcedureId) -> DeferredCredentialMetadata {
    DeferredCredentialMetadata {
        procedure_id,
        operation_mode: OperationMode::Sync,
        transaction_code: Some("tx-1".to_string()),
    }
}

fn service(
    procedures: MockCredentialProcedureRepository,
    deferred: MockDeferredCredentialMetadataRepository,
    notifications: MockNotificationProvider,
) -> SigningRecoveryServiceImpl {
    SigningRecoveryServiceImpl::new(
        Arc::new(procedures),
        Arc::new(deferred),
        Arc::new(notifications),
        "https://issuer.example.com".parse().unwrap(),
    )
}

#[tokio::test]
async fn test_parks_procedure_and_notifies_holder() {
    let procedure_id = Uuid::new_v4();

    let mut procedures = MockCredentialProcedureRepository::new();
    procedures
        .expect_find_by_procedure_id()
        .once()
        .returning(move |id| Ok(Some(procedure(*id))));
    procedures
        .expect_save()
        .once()
        .withf(|saved| {
            saved.operation_mode == OperationMode::Async
                && saved.credential_status == CredentialStatus::PendSignature
        })
        .returning(|_| Ok(()));

    let mut deferred = MockDeferredCredentialMetadataRepository::new();
    deferred
        .expect_find_by_procedure_id()
        .once()
        .returning(move |id| Ok(Some(metadata(*id))));
    deferred
        .expect_save()
        .once()
        .withf(|saved| {
            saved.operation_mode == OperationMode::Async
                && saved.transaction_code == Some("tx-1".to_string())
        })
        .returning(|_| Ok(()));

    let mut notifications = MockNotificationProvider::new();
    notifications
        .expect_send_pending_signature_notification()
        .once()
        .withf(move |to, template, id, frontend_url| {
            to == "holder@example.com"
                && template == PENDING_SIGNATURE_TEMPLATE
                && id == procedure_id.to_string()
                && frontend_url == "https://issuer.example.com/"
        })
        .returning(|_, _, _, _| Ok(()));

    service(procedures, deferred, notifications)
        .handle_post_recover_error(&procedure_id.to_string(), Some("holder@example.com"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_falls_back_to_updated_by_when_email_is_blank() {
    let procedure_id = Uuid::new_v4();

    let mut procedures = MockCredentialProcedureRepository::new();
    procedures
        .expect_find_by_procedure_id()
        .returning(move |id| Ok(Some(procedure(*id))));
    procedures.expect_save().returning(|_| Ok(()));

    let mut deferred = MockDeferredCredentialMetadataRepository::new();
    deferred
        .expect_find_by_procedure_id()
        .returning(move |id| Ok(Some(metadata(*id))));
    deferred.expect_save().returning(|_| Ok(()));

    let mut notifications = MockNotificationProvider::new();
    notifications
        .expect_send_pending_signature_notification()
        .once()
        .withf(|to, _, _, _| to == "operator@example.com")
        .returning(|_, _, _, _| Ok(()));

    service(procedures, deferred, notifications)
        .handle_post_recover_error(&procedure_id.to_string(), Some("  "))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_falls_back_to_updated_by_when_email_is_absent() {
    let procedure_id = Uuid::new_v4();

    let mut procedures = MockCredentialProcedureRepository::new();
    procedures
        .expect_find_by_procedure_id()
        .returning(move |id| Ok(Some(procedure(*id))));
    procedures.expect_save().returning(|_| Ok(()));

    let mut deferred = MockDeferredCredentialMetadataRepository::new();
    deferred
        .expect_find_by_procedure_id()
        .returning(move |id| Ok(Some(metadata(*id))));
    deferred.expect_save().returning(|_| Ok(()));

    let mut notifications = MockNotificationProvider::new();
    notifications
        .expect_send_pending_signature_notification()
        .once()
        .withf(|to, _, _, _| to == "operator@example.com")
        .returning(|_, _, _, _| Ok(()));

    service(procedures, deferred, notifications)
        .handle_post_recover_error(&procedure_id.to_string(), None)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_missing_deferred_metadata_is_tolerated() {
    let procedure_id = Uuid::new_v4();

    let mut procedures = MockCredentialProcedureRepository::new();
    procedures
        .expect_find_by_procedure_id()
        .returning(move |id| Ok(Some(procedure(*id))));
    procedures.expect_save().once().returning(|_| Ok(()));

    let mut deferred = MockDeferredCredentialMetadataRepository::new();
    deferred.expect_find_by_procedure_id().returning(|_| Ok(None));
    deferred.expect_save().never();

    let mut notifications = MockNotificationProvider::new();
    notifications
        .expect_send_pending_signature_notification()
        .once()
        .returning(|_, _, _, _| Ok(()));

    service(procedures, deferred, notifications)
        .handle_post_recover_error(&procedure_id.to_string(), Some("holder@example.com"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_unknown_procedure_makes_no_writes() {
    let mut procedures = MockCredentialProcedureRepository::new();
    procedures.expect_find_by_procedure_id().returning(|_| Ok(None));
    procedures.expect_save().never();

    let mut deferred = MockDeferredCredentialMetadataRepository::new();
    deferred.expect_find_by_procedure_id().never();
    deferred.expect_save().never();

    let mut notifications = MockNotificationProvider::new();
    notifications.expect_send_pending_signature_notification().never();

    let result = service(procedures, deferred, notifications)
        .handle_post_recover_error(&Uuid::new_v4().to_string(), None)
        .await;

    assert!(matches!(
        result,
        Err(ServiceError::EntityNotFound(
            EntityNotFoundError::CredentialProcedure(_)
        ))
    ));
}

#[tokio::test]
async fn test_invalid_procedure_id_is_a_validation_error() {
    let result = service(
        MockCredentialProcedureRepository::new(),
        MockDeferredCredentialMetadataRepository::new(),
        MockNotificationProvider::new(),
    )
    .handle_post_recover_error("not-a-uuid", None)
    .await;

    assert!(matches!(result, Err(ServiceError::Validation(_))));
}
