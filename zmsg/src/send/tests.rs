//! Tests for sending messages, using a scripted node.

use zmsg_chain::{memo::MEMO_SIZE, MemoError};
use zmsg_node_services::rpc::{OperationResult, OperationStatus};
use zmsg_test::prelude::*;

use super::*;

type Exchange = (Request, Result<Response, TransError>);

const OPERATION_ID: &str = "opid-1";

fn address(address: &str) -> Address {
    address.parse().expect("test addresses are valid")
}

fn list_addresses(addresses: &[&str]) -> Exchange {
    (
        Request::ListAddresses,
        Ok(Response::Addresses(
            addresses.iter().map(|a| address(a)).collect(),
        )),
    )
}

fn send_many(from: &str, to: &str, content: &str, value: Zec) -> Exchange {
    let memo = Memo::encode_text(content).expect("test messages fit");

    (
        Request::SendMany {
            from: address(from),
            recipients: vec![Recipient::new(address(to), value, &memo)],
        },
        Ok(Response::OperationId(OPERATION_ID.into())),
    )
}

fn succeeded(txid: &str) -> Exchange {
    (
        Request::GetOperationStatus(vec![OPERATION_ID.into()]),
        Ok(Response::OperationStatuses(vec![OperationStatus {
            id: OPERATION_ID.into(),
            status: "success".to_string().into(),
            creation_time: None,
            error: None,
            result: Some(OperationResult { txid: txid.into() }),
        }])),
    )
}

#[tokio::test(start_paused = true)]
async fn sends_from_first_address() -> Result<()> {
    zmsg_test::init();

    let mut node = Transcript::from([
        list_addresses(&["zs1first", "zs1second"]),
        send_many("zs1first", "zs1friend", "hi there", DEFAULT_MESSAGE_AMOUNT),
        succeeded("abc"),
    ]);

    let sent = SendFlow::new(&mut node, operation::Config::default())
        .send(None, address("zs1friend"), "hi there", DEFAULT_MESSAGE_AMOUNT)
        .await?;

    assert!(node.is_finished());
    assert_eq!(sent.from.as_str(), "zs1first");
    assert_eq!(sent.operation_id.as_str(), OPERATION_ID);
    assert_eq!(sent.txid.as_str(), "abc");

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn sends_from_given_address() -> Result<()> {
    zmsg_test::init();

    let value = Zec::from_zatoshis(50_000)?;
    let mut node = Transcript::from([
        send_many("zs1mine", "zs1friend", "hi", value),
        succeeded("abc"),
    ]);

    let sent = SendFlow::new(&mut node, operation::Config::default())
        .send(Some(address("zs1mine")), address("zs1friend"), "hi", value)
        .await?;

    assert!(node.is_finished());
    assert_eq!(sent.from.as_str(), "zs1mine");

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn no_addresses_fails_before_sending() -> Result<()> {
    zmsg_test::init();

    // A send request would be answered with a transcript error.
    let mut node = Transcript::from([list_addresses(&[])]);

    let error = SendFlow::new(&mut node, operation::Config::default())
        .send(None, address("zs1friend"), "hi", DEFAULT_MESSAGE_AMOUNT)
        .await
        .expect_err("wallet has no addresses");

    assert!(matches!(error, Error::NoAddressesAvailable), "{error:?}");
    assert_eq!(
        error.to_string(),
        "no addresses to send message from! (create one with the zcash-cli)"
    );
    assert!(node.is_finished());

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn oversized_message_fails_before_sending() -> Result<()> {
    zmsg_test::init();

    let mut node: Transcript<Request, Response> = Transcript::from([]);
    let content = "x".repeat(MEMO_SIZE + 1);

    let error = SendFlow::new(&mut node, operation::Config::default())
        .send(
            Some(address("zs1mine")),
            address("zs1friend"),
            &content,
            DEFAULT_MESSAGE_AMOUNT,
        )
        .await
        .expect_err("message is too long");

    assert!(
        matches!(
            error,
            Error::Memo(MemoError::ContentTooLarge { len }) if len == MEMO_SIZE + 1
        ),
        "{error:?}"
    );
    assert_eq!(node.served(), 0);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn send_errors_are_returned() -> Result<()> {
    zmsg_test::init();

    let (request, _) = send_many("zs1mine", "zs1friend", "hi", DEFAULT_MESSAGE_AMOUNT);
    let mut node = Transcript::from([(
        request,
        Err(TransError::Message("RPC Error (code: -6): Insufficient funds")),
    )]);

    let error = SendFlow::new(&mut node, operation::Config::default())
        .send(
            Some(address("zs1mine")),
            address("zs1friend"),
            "hi",
            DEFAULT_MESSAGE_AMOUNT,
        )
        .await
        .expect_err("node rejected the send");

    assert!(matches!(error, Error::Node(_)), "{error:?}");
    assert!(node.is_finished());

    Ok(())
}

#[test]
fn default_amount_is_configurable() -> Result<()> {
    zmsg_test::init();

    assert_eq!(Config::default().default_amount.zatoshis(), 1_000);

    let config: Config = toml::from_str("default_amount = 0.001")?;
    assert_eq!(config.default_amount.zatoshis(), 100_000);

    Ok(())
}
