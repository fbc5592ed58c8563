//! Sends and reads text messages in Zcash shielded memos, using a local zcashd.
//!
//! For usage please refer to the program help: `zmsg --help`

use color_eyre::eyre::Result;
use structopt::StructOpt;
use tokio::sync::watch;

use zmsg::{render::MessageBlock, Inbox, OperationHandle, SendFlow, ZmsgConfig};
use zmsg_node_services::rpc::OperationState;
use zmsg_node_services::rpc_client::RpcRequestClient;

mod args;
use self::args::{Args, Command, SendArgs};

/// `zmsg` entrypoint.
#[allow(clippy::print_stdout)]
#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::from_args();
    let verbose = matches!(args.command, Command::Check { verbose: true, .. });
    zmsg::init_tracing(verbose);

    let config = args.config()?;

    match &args.command {
        Command::Check { verbose, noconf } => check(&config, *verbose, *noconf).await,
        Command::Sendmsg(send) => sendmsg(&config, send).await,
    }
}

/// Prints the messages received by the wallet.
#[allow(clippy::print_stdout)]
async fn check(config: &ZmsgConfig, verbose: bool, include_unconfirmed: bool) -> Result<()> {
    let client = RpcRequestClient::new(&config.rpc)?;

    let messages = Inbox::new(client, config.inbox.clone())
        .check_messages(include_unconfirmed)
        .await?;

    for message in &messages {
        print!("{}", MessageBlock::new(message, verbose));
    }

    Ok(())
}

/// Sends a message, and waits for the node to create its transaction.
#[allow(clippy::print_stdout)]
async fn sendmsg(config: &ZmsgConfig, send: &SendArgs) -> Result<()> {
    let (to, message) = send.recipient_and_message()?;
    let from = send.sender()?;
    println!("message: {message:?}");

    let client = RpcRequestClient::new(&config.rpc)?;

    // Stop waiting on Ctrl-C. The node keeps running the send.
    let (cancel_sender, cancel) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = cancel_sender.send(true);
        }
    });

    let mut last_state = None;
    let mut flow = SendFlow::new(client, config.operation.clone())
        .with_cancel(cancel)
        .with_progress(Box::new(move |handle: &OperationHandle| {
            if last_state.as_ref() != Some(handle.state()) {
                if handle.state() == &OperationState::Executing {
                    println!("sending message...");
                }
                last_state = Some(handle.state().clone());
            }
        }));

    let chose_sender = from.is_none();
    let sent = flow
        .send(from, to, &message, config.send.default_amount)
        .await?;

    if chose_sender {
        println!("sent message from {}", sent.from);
    }
    println!("message sent! (txid = {})", sent.txid);

    Ok(())
}
