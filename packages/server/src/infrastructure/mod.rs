//! Infrastructure layer
//!
//! ドメイン層の trait の具体的な実装（インメモリのレジストリ、WebSocket による通知）と
//! 通信用の DTO を提供します。

pub mod dto;
pub mod message_pusher;
pub mod registry;
