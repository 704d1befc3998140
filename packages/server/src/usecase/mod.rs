//! UseCase layer
//!
//! 接続・表示名登録・メッセージ中継・切断・プレゼンス配信のユースケース。

pub mod connect_client;
pub mod disconnect_client;
pub mod error;
pub mod get_presence;
pub mod publish_presence;
pub mod register_name;
pub mod relay_message;

pub use connect_client::ConnectClientUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use error::RelayError;
pub use get_presence::GetPresenceUseCase;
pub use publish_presence::PresencePublisher;
pub use register_name::RegisterNameUseCase;
pub use relay_message::RelayMessageUseCase;
