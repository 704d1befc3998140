//! Server state shared by all handlers.

use std::sync::Arc;

use lanchat_shared::time::Clock;

use crate::{
    domain::MessagePusher,
    usecase::{
        ConnectClientUseCase, DisconnectClientUseCase, GetPresenceUseCase, RegisterNameUseCase,
        RelayMessageUseCase,
    },
};

/// Shared application state
pub struct AppState {
    /// ConnectClientUseCase（クライアント接続のユースケース）
    pub connect_client_usecase: Arc<ConnectClientUseCase>,
    /// RegisterNameUseCase（表示名登録のユースケース）
    pub register_name_usecase: Arc<RegisterNameUseCase>,
    /// RelayMessageUseCase（メッセージ中継のユースケース）
    pub relay_message_usecase: Arc<RelayMessageUseCase>,
    /// DisconnectClientUseCase（クライアント切断のユースケース）
    pub disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    /// GetPresenceUseCase（プレゼンス取得のユースケース）
    pub get_presence_usecase: Arc<GetPresenceUseCase>,
    /// MessagePusher（不正なフレームを送った接続へのエラー通知に使う）
    pub message_pusher: Arc<dyn MessagePusher>,
    /// Clock（HTTP レスポンスの生成時刻）
    pub clock: Arc<dyn Clock>,
    /// WebSocket の 1 メッセージの最大サイズ（バイト）
    pub max_message_size: usize,
}
