use alloy::network::Ethereum;
use alloy::providers::{Provider, ProviderBuilder, RootProvider};
use eyre::Result;
use futures_util::SinkExt;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::protocol::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use url::Url;

use crate::config::Config;

/// Creates a new HTTP provider for Ethereum network communication
///
/// # Arguments
/// * `config` - Application configuration carrying the RPC URL
///
/// # Returns
/// A root provider connected to the configured endpoint
///
/// # Errors
/// * If the RPC URL cannot be parsed
pub fn create_http_provider(config: &Config) -> Result<RootProvider<Ethereum>> {
    let url = Url::parse(&config.rpc_url)?;
    let provider = ProviderBuilder::new().on_http(url);
    Ok((*provider.root()).clone())
}

/// Opens a WebSocket connection and sends the given JSON-RPC request
///
/// # Arguments
/// * `ws_url` - The WebSocket endpoint
/// * `request` - The serialized request to send after connecting
///
/// # Returns
/// The open stream, ready to be read for responses and notifications
///
/// # Errors
/// * If the WebSocket connection cannot be established
/// * If sending the request fails
pub async fn send_ws_request(
    ws_url: &str,
    request: String,
) -> Result<WebSocketStream<MaybeTlsStream<TcpStream>>> {
    let (mut ws_stream, _) = connect_async(ws_url).await?;
    ws_stream.send(Message::Text(request)).await?;
    Ok(ws_stream)
}
