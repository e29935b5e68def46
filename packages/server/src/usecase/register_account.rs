//! UseCase: アカウント登録処理

use std::sync::Arc;

use crate::domain::{AccountRepository, Password, Username};

use super::error::RegisterError;

/// アカウント登録のユースケース
pub struct RegisterAccountUseCase {
    /// Repository（Account Directory の抽象化）
    account_repository: Arc<dyn AccountRepository>,
}

impl RegisterAccountUseCase {
    pub fn new(account_repository: Arc<dyn AccountRepository>) -> Self {
        Self { account_repository }
    }

    /// アカウント登録を実行
    ///
    /// ログイン状態に関係なく実行できます。
    ///
    /// # Returns
    ///
    /// * `Ok(())` - 登録成功
    /// * `Err(RegisterError::UsernameTaken)` - 同じユーザー名が登録済み
    pub async fn execute(&self, username: Username, password: Password) -> Result<(), RegisterError> {
        let name = username.as_str().to_string();
        if self.account_repository.register(username, password).await {
            Ok(())
        } else {
            Err(RegisterError::UsernameTaken(name))
        }
    }
}
