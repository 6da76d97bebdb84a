use tracing::{instrument, warn};

use bursar_auth::{TokenError, issue_token, verify_token};
use bursar_config::JwtConfig;
use bursar_core::verify_password_or_decoy;
use bursar_db::Store;
use bursar_models::{Account, AccountView, RegisterRequest, TokenRequest, TokenResponse, normalize_email};

use super::error::AuthError;
use crate::modules::accounts::repository::AccountRepository;

pub struct AuthService;

impl AuthService {
    /// Creates an account unless one already exists for the email, ignoring case.
    ///
    /// The pre-check gives the common case a clean error; a concurrent
    /// registration that slips past it is caught by the unique index and
    /// reported the same way.
    #[instrument(skip_all)]
    pub async fn register<S: Store>(store: &S, dto: RegisterRequest) -> Result<Account, AuthError> {
        let dto = RegisterRequest {
            email: normalize_email(&dto.email),
            ..dto
        };

        if AccountRepository::get_by_email(store, &dto.email)
            .await?
            .is_some()
        {
            warn!("registration rejected: email already in use");
            return Err(AuthError::Conflict);
        }

        let account = AccountRepository::create_with_hash(store, dto).await?;
        Ok(account)
    }

    /// Exchanges an email and password for an access token.
    ///
    /// An unknown email and a wrong password fail identically, and both cost
    /// one bcrypt verification.
    #[instrument(skip_all)]
    pub async fn authenticate<S: Store>(
        store: &S,
        dto: TokenRequest,
        jwt_config: &JwtConfig,
    ) -> Result<TokenResponse, AuthError> {
        let email = normalize_email(&dto.email);
        let account = AccountRepository::get_by_email(store, &email).await?;

        // A miss still pays for one bcrypt verification.
        let digest = account.as_ref().map(|a| a.password_digest.clone());
        let password = dto.password;
        let valid = tokio::task::spawn_blocking(move || {
            verify_password_or_decoy(&password, digest.as_deref())
        })
        .await?;

        let Some(account) = account.filter(|_| valid) else {
            return Err(AuthError::InvalidCredentials);
        };

        let access_token = issue_token(account.id, jwt_config)?;
        Ok(TokenResponse {
            access_token,
            user: AccountView::from(account),
        })
    }

    /// Resolves a bearer token to its account.
    ///
    /// Expired, forged and malformed tokens, and tokens for accounts that no
    /// longer exist, all come back as [`AuthError::Unauthenticated`].
    #[instrument(skip_all)]
    pub async fn resolve_token<S: Store>(
        store: &S,
        token: &str,
        jwt_config: &JwtConfig,
    ) -> Result<Account, AuthError> {
        let claims = verify_token(token, jwt_config).map_err(|err| {
            match &err {
                TokenError::Expired => warn!("rejected expired token"),
                other => warn!(error = %other, "rejected invalid token"),
            }
            AuthError::Unauthenticated
        })?;

        let account_id = claims.account_id().map_err(|err| {
            warn!(error = %err, "token subject is not an account id");
            AuthError::Unauthenticated
        })?;

        AccountRepository::get_by_attribute(store, "id", account_id)
            .await?
            .ok_or_else(|| {
                warn!(account_id, "token subject no longer exists");
                AuthError::Unauthenticated
            })
    }
}
