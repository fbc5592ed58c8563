//! A [`Service`](tower::Service) implementation based on a fixed transcript.
//!
//! A transcript is a list of expected requests, each paired with the response
//! or error the service should return for it. Any request that differs from
//! the next expected request, or arrives after the transcript has ended, is
//! answered with an error. Tests use this to check both what a component asks
//! the node and when it stops asking.

use std::{
    collections::VecDeque,
    fmt::Debug,
    task::{Context, Poll},
};

use color_eyre::{
    eyre::{eyre, Report},
    section::{Section, SectionExt},
};
use futures::future::{ready, Ready};
use tower::Service;

/// An error returned by a [`Transcript`] in place of a response.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TransError {
    /// A generic mock error.
    Any,

    /// A mock error with a specific message.
    Message(&'static str),
}

impl TransError {
    fn mock(&self) -> Report {
        match self {
            TransError::Any => eyre!("mock error"),
            TransError::Message(message) => eyre!("{message}"),
        }
    }
}

/// A mock service that answers a fixed sequence of requests.
#[must_use]
#[derive(Debug)]
pub struct Transcript<R, S> {
    messages: VecDeque<(R, Result<S, TransError>)>,
    served: usize,
}

impl<R, S> FromIterator<(R, Result<S, TransError>)> for Transcript<R, S> {
    fn from_iter<I: IntoIterator<Item = (R, Result<S, TransError>)>>(messages: I) -> Self {
        Self {
            messages: messages.into_iter().collect(),
            served: 0,
        }
    }
}

impl<R, S, const N: usize> From<[(R, Result<S, TransError>); N]> for Transcript<R, S> {
    fn from(messages: [(R, Result<S, TransError>); N]) -> Self {
        messages.into_iter().collect()
    }
}

impl<R, S> Transcript<R, S> {
    /// Returns the number of requests this transcript has answered.
    pub fn served(&self) -> usize {
        self.served
    }

    /// Returns the number of expected requests that have not been made yet.
    pub fn remaining(&self) -> usize {
        self.messages.len()
    }

    /// Returns true if every expected request has been made.
    pub fn is_finished(&self) -> bool {
        self.messages.is_empty()
    }
}

impl<R, S> Service<R> for Transcript<R, S>
where
    R: Debug + Eq,
{
    type Response = S;
    type Error = Report;
    type Future = Ready<Result<S, Report>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: R) -> Self::Future {
        let Some((expected_request, response)) = self.messages.pop_front() else {
            return ready(
                Err(eyre!("got request after transcript ended"))
                    .with_section(|| format!("{request:?}").header("Found Request:")),
            );
        };

        self.served += 1;

        if request != expected_request {
            return ready(
                Err(eyre!("received unexpected request"))
                    .with_section(|| format!("{expected_request:?}").header("Expected Request:"))
                    .with_section(|| format!("{request:?}").header("Found Request:")),
            );
        }

        ready(response.map_err(|error| error.mock()))
    }
}
