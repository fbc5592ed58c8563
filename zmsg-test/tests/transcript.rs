//! Tests for the transcript mock service.

use tower::{Service, ServiceExt};

use zmsg_test::transcript::{TransError, Transcript};

const TRANSCRIPT_DATA: [(&str, &str); 4] = [
    ("req1", "rsp1"),
    ("req2", "rsp2"),
    ("req3", "rsp3"),
    ("req4", "rsp4"),
];

fn transcript() -> Transcript<&'static str, &'static str> {
    TRANSCRIPT_DATA
        .iter()
        .map(|(req, rsp)| (*req, Ok::<_, TransError>(*rsp)))
        .collect()
}

#[tokio::test]
async fn transcript_returns_responses_and_ends() {
    zmsg_test::init();

    let mut svc = transcript();

    for (req, rsp) in TRANSCRIPT_DATA.iter() {
        assert_eq!(svc.ready().await.unwrap().call(*req).await.unwrap(), *rsp);
    }

    assert!(svc.is_finished());
    assert_eq!(svc.served(), TRANSCRIPT_DATA.len());
    assert!(svc.ready().await.unwrap().call("end").await.is_err());
}

#[tokio::test]
async fn transcript_errors_wrong_request() {
    zmsg_test::init();

    let mut svc = transcript();

    assert_eq!(
        svc.ready().await.unwrap().call("req1").await.unwrap(),
        "rsp1",
    );
    assert!(svc.ready().await.unwrap().call("bad").await.is_err());
    assert_eq!(svc.remaining(), 2);
}

#[tokio::test]
async fn transcript_returns_scripted_errors() {
    zmsg_test::init();

    let mut svc: Transcript<&str, &str> = Transcript::from([
        ("req1", Err(TransError::Message("node is warming up"))),
        ("req2", Err(TransError::Any)),
    ]);

    let error = svc.ready().await.unwrap().call("req1").await.unwrap_err();
    assert_eq!(error.to_string(), "node is warming up");

    assert!(svc.ready().await.unwrap().call("req2").await.is_err());
    assert!(svc.is_finished());
}
