//! Code format, digests and the consume-once check.

use super::*;
use crate::domain::ErrorCode;
use crate::domain::fixture_clock::{fixture_clock, term_start};
use crate::domain::ports::MockEduVerificationRepository;
use mockall::predicate::{always, eq};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rstest::{fixture, rstest};

#[fixture]
fn alice() -> UserId {
    UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id")
}

fn service(repo: MockEduVerificationRepository) -> EduVerificationService<MockEduVerificationRepository> {
    EduVerificationService::new(Arc::new(repo), fixture_clock(), DEFAULT_CODE_TTL)
}

#[rstest]
#[case("123456", true)]
#[case(" 000042\n", true)]
#[case("12345", false)]
#[case("1234567", false)]
#[case("12a456", false)]
#[case("", false)]
#[case("１２３４５６", false)]
fn parses_six_digit_codes(#[case] raw: &str, #[case] accepted: bool) {
    assert_eq!(VerificationCode::parse(raw).is_some(), accepted);
}

#[rstest]
fn generated_codes_are_zero_padded() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let code = VerificationCode::generate(&mut rng);
        assert_eq!(code.as_str().len(), CODE_LENGTH);
        assert!(VerificationCode::parse(code.as_str()).is_some());
    }
}

#[rstest]
fn digest_is_bound_to_user(alice: UserId) {
    let code = VerificationCode::parse("123456").expect("valid");
    let bob = UserId::new("9b2e4c1a-8f3d-4e5b-a6c7-d8e9f0a1b2c3").expect("valid id");
    assert_ne!(code.digest_for(&alice), code.digest_for(&bob));
    assert_eq!(code.digest_for(&alice), code.digest_for(&alice));
    assert_eq!(code.digest_for(&alice).as_str().len(), 64);
}

#[rstest]
fn debug_output_hides_code() {
    let code = VerificationCode::parse("123456").expect("valid");
    assert!(!format!("{code:?}").contains("123456"));
}

#[rstest]
#[tokio::test]
async fn issue_stores_digest_with_ttl(alice: UserId) {
    let expected_user = alice.clone();
    let mut repo = MockEduVerificationRepository::new();
    repo.expect_store()
        .withf(move |pending| {
            pending.user_id == expected_user
                && pending.expires_at == term_start() + DEFAULT_CODE_TTL
        })
        .times(1)
        .returning(|_| Ok(()));

    let issued = service(repo).issue(&alice).await.expect("issued");
    assert_eq!(issued.record.code_digest, issued.code.digest_for(&alice));
}

#[rstest]
#[tokio::test]
async fn matching_code_is_consumed(alice: UserId) {
    let code = VerificationCode::parse("654321").expect("valid");
    let mut repo = MockEduVerificationRepository::new();
    repo.expect_consume()
        .with(eq(alice.clone()), eq(code.digest_for(&alice)), eq(term_start()))
        .times(1)
        .returning(|_, _, _| Ok(true));

    service(repo)
        .verify_code(&alice, "654321")
        .await
        .expect("accepted");
}

#[rstest]
#[tokio::test]
async fn expired_or_used_code_is_denied(alice: UserId) {
    let mut repo = MockEduVerificationRepository::new();
    repo.expect_consume()
        .with(always(), always(), always())
        .returning(|_, _, _| Ok(false));

    let err = service(repo)
        .verify_code(&alice, "654321")
        .await
        .expect_err("denied");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), "Invalid or expired code");
}

#[rstest]
#[tokio::test]
async fn malformed_code_never_reaches_store(alice: UserId) {
    let mut repo = MockEduVerificationRepository::new();
    repo.expect_consume().never();

    let err = service(repo)
        .verify_code(&alice, "12 34")
        .await
        .expect_err("denied");
    assert_eq!(err.message(), INVALID_CODE_MESSAGE);
}

#[rstest]
#[tokio::test]
async fn store_outage_is_not_a_denial(alice: UserId) {
    let mut repo = MockEduVerificationRepository::new();
    repo.expect_consume()
        .returning(|_, _, _| Err(EduVerificationRepositoryError::connection("timeout")));

    let err = service(repo)
        .verify_code(&alice, "654321")
        .await
        .expect_err("outage");
    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn clones_share_the_store_without_cloning_it(alice: UserId) {
    // The mock repository is not `Clone`; cloning the service must still work.
    let mut repo = MockEduVerificationRepository::new();
    repo.expect_consume()
        .times(2)
        .returning(|_, _, _| Ok(true));

    let original = service(repo);
    let copy = original.clone();
    original
        .verify_code(&alice, "111111")
        .await
        .expect("original accepted");
    copy.verify_code(&alice, "222222")
        .await
        .expect("clone accepted");
}
