//! Tests for reading messages, using a scripted node.

use chrono::TimeZone;
use color_eyre::eyre::Result;

use zmsg_chain::{MemoError, MemoKind};
use zmsg_node_services::rpc::{ReceivedNote, TransactionInfo};
use zmsg_test::{
    transcript::{TransError, Transcript},
    vectors::{
        padded_memo_hex, HELLO_PLAIN_TEXT_MEMO_HEX, HELLO_TYPED_TEXT_MEMO_HEX,
        HOW_ARE_YOU_PLAIN_TEXT_MEMO_HEX, NO_MEMO_HEX, OVERLONG_TYPED_MEMO_HEX,
        UNFORMATTED_MEMO_HEX, UNKNOWN_TYPE_MEMO_HEX,
    },
};

use super::*;

type Exchange = (Request, Result<Response, TransError>);

fn address(address: &str) -> Address {
    address.parse().expect("test addresses are valid")
}

fn note(txid: &str, zatoshis: u64, memo: &str) -> ReceivedNote {
    ReceivedNote {
        txid: txid.into(),
        amount: Zec::from_zatoshis(zatoshis).expect("test amounts are valid"),
        memo: memo.to_string(),
    }
}

fn list_addresses(addresses: &[&str]) -> Exchange {
    (
        Request::ListAddresses,
        Ok(Response::Addresses(
            addresses.iter().map(|a| address(a)).collect(),
        )),
    )
}

fn list_notes(to: &str, notes: Vec<ReceivedNote>) -> Exchange {
    (
        Request::list_received_by_address(address(to), false),
        Ok(Response::ReceivedNotes(notes)),
    )
}

fn get_transaction(txid: &str, time: i64, confirmations: i64) -> Exchange {
    (
        Request::GetTransaction(txid.into()),
        Ok(Response::Transaction(TransactionInfo {
            txid: txid.into(),
            time: Utc.timestamp_opt(time, 0).unwrap(),
            confirmations,
        })),
    )
}

#[tokio::test]
async fn messages_are_in_address_then_note_order() -> Result<()> {
    zmsg_test::init();

    let mut node = Transcript::from([
        list_addresses(&["zs1alice", "zs1bob"]),
        list_notes(
            "zs1alice",
            vec![
                note("tx1", 1_000, &HELLO_PLAIN_TEXT_MEMO_HEX),
                note("tx2", 2_000, &HOW_ARE_YOU_PLAIN_TEXT_MEMO_HEX),
            ],
        ),
        get_transaction("tx1", 1_500_000_300, 10),
        get_transaction("tx2", 1_500_000_200, 9),
        list_notes(
            "zs1bob",
            vec![
                note("tx3", 3_000, &HELLO_TYPED_TEXT_MEMO_HEX),
                note("tx4", 4_000, &padded_memo_hex("fine, thanks".as_bytes())),
            ],
        ),
        get_transaction("tx3", 1_500_000_100, 8),
        get_transaction("tx4", 1_500_000_000, 0),
    ]);

    let messages = Inbox::new(&mut node, Config::default())
        .check_messages(false)
        .await?;

    assert!(node.is_finished());

    let summary: Vec<_> = messages
        .iter()
        .map(|message| {
            (
                message.to.as_str(),
                message.txid.as_str(),
                message.content.as_str(),
                message.value.zatoshis(),
            )
        })
        .collect();
    assert_eq!(
        summary,
        [
            ("zs1alice", "tx1", "hello", 1_000),
            ("zs1alice", "tx2", "how are you?", 2_000),
            ("zs1bob", "tx3", "hello", 3_000),
            ("zs1bob", "tx4", "fine, thanks", 4_000),
        ]
    );

    // Not sorted by time.
    assert_eq!(
        messages[0].timestamp.map(|time| time.timestamp()),
        Some(1_500_000_300)
    );
    assert_eq!(messages[2].kind, MemoKind::TypedText);
    assert_eq!(messages[3].confirmations, Some(0));

    Ok(())
}

#[tokio::test]
async fn notes_without_text_are_skipped() -> Result<()> {
    zmsg_test::init();

    // Skipped notes don't need a transaction lookup.
    let mut node = Transcript::from([
        list_addresses(&["zs1alice", "zs1bob"]),
        list_notes(
            "zs1alice",
            vec![
                note("tx1", 1_000, &UNFORMATTED_MEMO_HEX),
                note("tx2", 2_000, &HELLO_PLAIN_TEXT_MEMO_HEX),
            ],
        ),
        get_transaction("tx2", 1_500_000_000, 1),
        list_notes(
            "zs1bob",
            vec![
                note("tx3", 3_000, &NO_MEMO_HEX),
                note("tx4", 4_000, &UNKNOWN_TYPE_MEMO_HEX),
            ],
        ),
    ]);

    let messages = Inbox::new(&mut node, Config::default())
        .check_messages(false)
        .await?;

    assert!(node.is_finished());
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].txid.as_str(), "tx2");
    assert_eq!(messages[0].content, "hello");

    Ok(())
}

#[tokio::test]
async fn unconfirmed_notes_are_requested_with_zero_confirmations() -> Result<()> {
    zmsg_test::init();

    let mut node = Transcript::from([
        list_addresses(&["zs1alice"]),
        (
            Request::ListReceivedByAddress {
                address: address("zs1alice"),
                min_confirmations: 0,
            },
            Ok(Response::ReceivedNotes(Vec::new())),
        ),
    ]);

    let messages = Inbox::new(&mut node, Config::default())
        .check_messages(true)
        .await?;

    assert!(messages.is_empty());
    assert!(node.is_finished());

    Ok(())
}

#[tokio::test]
async fn timestamps_are_optional() -> Result<()> {
    zmsg_test::init();

    let mut node = Transcript::from([
        list_addresses(&["zs1alice"]),
        list_notes("zs1alice", vec![note("tx1", 1_000, &HELLO_PLAIN_TEXT_MEMO_HEX)]),
    ]);
    let config = Config {
        fetch_timestamps: false,
    };

    let messages = Inbox::new(&mut node, config).check_messages(false).await?;

    assert!(node.is_finished());
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].timestamp, None);
    assert_eq!(messages[0].confirmations, None);

    Ok(())
}

#[tokio::test]
async fn malformed_memo_fails_the_whole_check() -> Result<()> {
    zmsg_test::init();

    // The second address is never listed.
    let mut node = Transcript::from([
        list_addresses(&["zs1alice", "zs1bob"]),
        list_notes(
            "zs1alice",
            vec![
                note("tx1", 1_000, &HELLO_PLAIN_TEXT_MEMO_HEX),
                note("tx2", 2_000, &OVERLONG_TYPED_MEMO_HEX),
            ],
        ),
        get_transaction("tx1", 1_500_000_000, 1),
    ]);

    let error = Inbox::new(&mut node, Config::default())
        .check_messages(false)
        .await
        .expect_err("memo is malformed");

    assert!(
        matches!(error, Error::Memo(MemoError::MalformedFrame(_))),
        "{error:?}"
    );
    assert!(node.is_finished());

    Ok(())
}

#[tokio::test]
async fn invalid_memo_hex_fails_the_whole_check() -> Result<()> {
    zmsg_test::init();

    let mut node = Transcript::from([
        list_addresses(&["zs1alice"]),
        list_notes("zs1alice", vec![note("tx1", 1_000, "zz")]),
    ]);

    let error = Inbox::new(&mut node, Config::default())
        .check_messages(false)
        .await
        .expect_err("memo is not hex");

    assert!(
        matches!(error, Error::Memo(MemoError::InvalidHex(_))),
        "{error:?}"
    );

    Ok(())
}

#[tokio::test]
async fn node_errors_are_returned() -> Result<()> {
    zmsg_test::init();

    let mut node = Transcript::from([(
        Request::ListAddresses,
        Err(TransError::Message("failed to connect to zcash daemon, is it running?")),
    )]);

    let error = Inbox::new(&mut node, Config::default())
        .check_messages(false)
        .await
        .expect_err("node is down");

    assert_eq!(
        error.to_string(),
        "failed to connect to zcash daemon, is it running?"
    );

    Ok(())
}
