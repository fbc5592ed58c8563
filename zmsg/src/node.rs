//! Calls to the node RPC service.

use tower::{Service, ServiceExt};

use zmsg_node_services::{
    rpc::{Request, Response},
    BoxError,
};

use crate::Error;

/// Waits for `node` to be ready, then sends it `request`.
pub(crate) async fn call<S>(node: &mut S, request: Request) -> Result<Response, Error>
where
    S: Service<Request, Response = Response>,
    S::Error: Into<BoxError>,
{
    node.ready()
        .await
        .map_err(|error| Error::Node(error.into()))?
        .call(request)
        .await
        .map_err(|error| Error::Node(error.into()))
}
