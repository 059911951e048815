//! 身份服务：注册、登录、会话与用户维护

use crate::{
    auth::password::PasswordHasher,
    auth::session::{hash_token, Session, SessionToken},
    config::AppConfig,
    error::AppError,
    models::user::{
        ActiveSession, LoginRequest, Role, SignUpRequest, UpdateUserRequest, User, UserResponse,
        DEFAULT_AVATAR,
    },
    repository::user_repo::UserRepository,
    services::audit_service::{AuditAction, AuditService},
    store::Store,
};
use chrono::Utc;
use secrecy::ExposeSecret;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

pub struct IdentityService {
    store: Arc<Store>,
    config: Arc<AppConfig>,
}

impl IdentityService {
    pub fn new(store: Arc<Store>, config: Arc<AppConfig>) -> Self {
        Self { store, config }
    }

    /// 用户注册
    ///
    /// 新账户总是 Player 角色；注册成功即建立会话。
    #[instrument(skip(self, req))]
    pub fn sign_up(&self, req: SignUpRequest) -> Result<Session, AppError> {
        req.validate()?;
        PasswordHasher::validate_password_policy(req.password.expose_secret(), &self.config)?;

        let hasher = PasswordHasher::new();
        let password_hash = hasher.hash(req.password.expose_secret())?;

        let user = User {
            id: Uuid::new_v4(),
            name: req.name,
            email: req.email,
            password_hash,
            phone: req.phone,
            location: req.location,
            bio: String::new(),
            sports: BTreeSet::new(),
            avatar: DEFAULT_AVATAR.to_string(),
            role: Role::Player,
            join_date: Utc::now().date_naive(),
        };

        let user_repo = UserRepository::new(self.store.clone());
        // 邮箱冲突检查与写入在同一事务内
        user_repo.create(&user)?;

        let session = self.materialize_session(&user)?;

        // 忽略审计日志错误，不要破坏请求流程
        let _ = self.audit_service().record(
            &user.email,
            AuditAction::UserSignup,
            Some(user.id),
            None,
        );

        info!(user_id = %user.id, "User signed up");
        Ok(session)
    }

    /// 用户登录
    #[instrument(skip(self, req))]
    pub fn login(&self, req: LoginRequest) -> Result<Session, AppError> {
        let user_repo = UserRepository::new(self.store.clone());

        // 查不到邮箱与密码错误返回同一个错误，不泄露邮箱是否存在
        let user = user_repo
            .find_by_email(&req.email)
            .ok_or(AppError::InvalidCredentials)?;

        let hasher = PasswordHasher::new();
        hasher.verify(req.password.expose_secret(), &user.password_hash)?;

        let session = self.materialize_session(&user)?;

        let _ = self.audit_service().record(
            &user.email,
            AuditAction::UserLogin,
            Some(user.id),
            None,
        );

        info!(user_id = %user.id, "User logged in");
        Ok(session)
    }

    /// 登出（清除活动会话；幂等）
    pub fn logout(&self, token: &SessionToken) -> Result<(), AppError> {
        let token_hash = hash_token(token.as_str());

        let cleared = self.store.with_tx(|state| {
            match &state.current_user {
                Some(session) if session.token_hash == token_hash => {
                    let actor = session.user.email.clone();
                    state.current_user = None;
                    Ok(Some(actor))
                }
                // 无匹配会话时什么都不做
                _ => Ok(None),
            }
        })?;

        if let Some(actor) = cleared {
            let _ = self
                .audit_service()
                .record(&actor, AuditAction::UserLogout, None, None);
            info!("User logged out");
        }

        Ok(())
    }

    /// 当前已认证的用户
    pub fn current_user(&self, token: &SessionToken) -> Result<UserResponse, AppError> {
        let token_hash = hash_token(token.as_str());

        self.store
            .read(|state| {
                state
                    .current_user
                    .as_ref()
                    .filter(|session| session.token_hash == token_hash)
                    .map(|session| session.user.clone())
            })
            .ok_or(AppError::Unauthorized)
    }

    /// 更新用户资料（合并给出的字段）
    pub fn update_user(
        &self,
        user_id: Uuid,
        req: UpdateUserRequest,
    ) -> Result<UserResponse, AppError> {
        let user_repo = UserRepository::new(self.store.clone());
        let updated = user_repo.update(user_id, &req)?;

        let _ = self.audit_service().record(
            &updated.email,
            AuditAction::UserUpdate,
            Some(user_id),
            None,
        );

        Ok(updated.into())
    }

    /// 修改用户角色
    ///
    /// 管理员直接编辑可指定任意角色；审核流程只会使用
    /// `ApplicationKind::granted_role` 的确定映射。
    pub fn set_role(&self, user_id: Uuid, role: Role) -> Result<UserResponse, AppError> {
        let user_repo = UserRepository::new(self.store.clone());
        let before = user_repo
            .find_by_id(&user_id)
            .ok_or_else(|| AppError::not_found("user"))?;

        let updated = user_repo.set_role(user_id, role)?;

        let _ = self.audit_service().record(
            &updated.email,
            AuditAction::UserRoleChange,
            Some(user_id),
            Some(&format!("{} -> {}", before.role, updated.role)),
        );

        info!(user_id = %user_id, role = %role, "User role updated");
        Ok(updated.into())
    }

    /// 建立活动会话（覆盖之前的会话，单会话语义）
    fn materialize_session(&self, user: &User) -> Result<Session, AppError> {
        let token = SessionToken::generate();
        let session_doc = ActiveSession {
            token_hash: hash_token(token.as_str()),
            user: user.clone().into(),
            logged_in_at: Utc::now(),
        };

        self.store.with_tx(|state| {
            state.current_user = Some(session_doc.clone());
            Ok(())
        })?;

        Ok(Session {
            token,
            user: user.clone().into(),
        })
    }

    fn audit_service(&self) -> AuditService {
        AuditService::new(self.store.clone())
    }
}
