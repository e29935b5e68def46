//! UseCase: ログイン処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - LoginUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 未登録ユーザーと誤ったパスワードが区別されずに失敗すること
//! - 認証済みセッションでの再ログインが拒否され、束縛済みのユーザー名が変わらないこと
//!
//! ### どのような状況を想定しているか
//! - 正常系：登録済みユーザーのログイン
//! - 異常系：未登録ユーザー、誤ったパスワード、再ログイン

use std::sync::Arc;

use crate::domain::{AccountRepository, Password, Session, Username};

use super::error::LoginError;

/// ログインのユースケース
pub struct LoginUseCase {
    /// Repository（Account Directory の抽象化）
    account_repository: Arc<dyn AccountRepository>,
}

impl LoginUseCase {
    pub fn new(account_repository: Arc<dyn AccountRepository>) -> Self {
        Self { account_repository }
    }

    /// ログインを実行
    ///
    /// 成功するとセッションにユーザー名が束縛されます。
    /// 既に認証済みのセッションでは認証を行わずに拒否します。
    pub async fn execute(
        &self,
        session: &mut Session,
        username: Username,
        password: Password,
    ) -> Result<(), LoginError> {
        if let Some(current) = session.username() {
            return Err(LoginError::AlreadyAuthenticated(current.as_str().to_string()));
        }

        if !self
            .account_repository
            .authenticate(&username, &password)
            .await
        {
            return Err(LoginError::InvalidCredentials);
        }

        session.bind_username(username);
        Ok(())
    }
}
