use crate::output::emit_ok;
use crate::{CliContext, CliError};
use acctthrive_core::{resolve_acctthrive_config_path, ConfigPathScope, ExitCode, MachineError};
use acctthrive_model::{Ngn, Usd, UserId};
use acctthrive_referrals::{
    DepositOutcome, ReferralOutcome, ReferralService, SystemClock, UuidEntropy,
};
use acctthrive_store::{state_file_path, LocalFsStore};
use serde_json::json;

type FileLedger = ReferralService<LocalFsStore, SystemClock, UuidEntropy>;

fn open_ledger(ctx: &CliContext) -> Result<FileLedger, CliError> {
    Ok(ReferralService::open(
        LocalFsStore::new(ctx.state_dir.clone()),
        SystemClock,
        UuidEntropy,
        ctx.config.clone(),
    )?)
}

fn parse_user(raw: &str) -> Result<UserId, CliError> {
    UserId::parse(raw).map_err(|e| CliError::validation("invalid_user_id", &e.to_string()))
}

pub(crate) fn account(ctx: &CliContext, user_id: &str) -> Result<(), CliError> {
    let user_id = parse_user(user_id)?;
    let mut ledger = open_ledger(ctx)?;
    let account = ledger.get_or_create_account(&user_id)?;
    let rate = ledger.exchange_rate();
    emit_ok(
        ctx.output,
        &json!({
            "command": "account",
            "account": account,
            "share_link": ledger.share_link(&account.code),
            "total_earnings_ngn": rate.to_foreign(account.total_earnings),
            "pending_earnings_ngn": rate.to_foreign(account.pending_earnings),
        }),
    )
}

pub(crate) fn validate_code(ctx: &CliContext, code: &str) -> Result<(), CliError> {
    let ledger = open_ledger(ctx)?;
    let Some(referrer_id) = ledger.referrer_by_code(code) else {
        return Err(CliError::validation(
            "unknown_code",
            &format!("referral code `{code}` does not belong to any account"),
        ));
    };
    emit_ok(
        ctx.output,
        &json!({
            "command": "validate-code",
            "code": code,
            "valid": true,
            "referrer_id": referrer_id,
        }),
    )
}

pub(crate) fn refer(ctx: &CliContext, code: &str, referred_user_id: &str) -> Result<(), CliError> {
    let referred_user_id = parse_user(referred_user_id)?;
    let mut ledger = open_ledger(ctx)?;
    match ledger.try_record_referral(code, &referred_user_id)? {
        ReferralOutcome::Recorded(id) => emit_ok(
            ctx.output,
            &json!({
                "command": "refer",
                "status": "recorded",
                "relationship": id,
                "referrer_id": ledger.referrer_by_code(code),
                "referred_user_id": referred_user_id,
            }),
        ),
        ReferralOutcome::Rejected(reason) => Err(CliError {
            exit_code: ExitCode::Validation,
            machine: MachineError::new(
                "referral_rejected",
                &format!("referral rejected: {}", reason.as_str()),
            )
            .with_detail("reason", reason.as_str())
            .with_detail("code", code),
        }),
    }
}

pub(crate) fn deposit(ctx: &CliContext, user_id: &str, amount_usd: &str) -> Result<(), CliError> {
    let amount =
        Usd::parse(amount_usd).map_err(|e| CliError::validation("invalid_amount", &e.to_string()))?;
    let user_id = parse_user(user_id)?;
    let mut ledger = open_ledger(ctx)?;
    let payload = match ledger.apply_deposit(&user_id, amount)? {
        DepositOutcome::NoPendingReferral => json!({
            "command": "deposit",
            "outcome": "no_pending_referral",
            "qualified": false,
            "amount": amount,
        }),
        DepositOutcome::Accumulated {
            relationship,
            accumulated,
        } => json!({
            "command": "deposit",
            "outcome": "accumulated",
            "qualified": false,
            "amount": amount,
            "relationship": relationship,
            "accumulated_deposit": accumulated,
            "minimum_deposit": ledger.config().minimum_deposit_usd,
        }),
        DepositOutcome::Qualified {
            relationship,
            referrer_id,
            bonus,
        } => json!({
            "command": "deposit",
            "outcome": "qualified",
            "qualified": true,
            "amount": amount,
            "relationship": relationship,
            "referrer_id": referrer_id,
            "bonus": bonus,
            "bonus_ngn": ledger.exchange_rate().to_foreign(bonus),
        }),
    };
    emit_ok(ctx.output, &payload)
}

pub(crate) fn stats(ctx: &CliContext, user_id: &str) -> Result<(), CliError> {
    let user_id = parse_user(user_id)?;
    let ledger = open_ledger(ctx)?;
    let stats = ledger.stats(&user_id);
    let rate = ledger.exchange_rate();
    emit_ok(
        ctx.output,
        &json!({
            "command": "stats",
            "user_id": user_id,
            "stats": stats,
            "total_earnings_ngn": rate.to_foreign(stats.total_earnings),
            "pending_earnings_ngn": rate.to_foreign(stats.pending_earnings),
        }),
    )
}

pub(crate) fn recent(ctx: &CliContext, user_id: &str, limit: usize) -> Result<(), CliError> {
    let user_id = parse_user(user_id)?;
    let ledger = open_ledger(ctx)?;
    emit_ok(
        ctx.output,
        &json!({
            "command": "recent",
            "user_id": user_id,
            "limit": limit,
            "relationships": ledger.recent(&user_id, limit),
        }),
    )
}

pub(crate) fn convert(ctx: &CliContext, usd: Option<&str>, ngn: Option<&str>) -> Result<(), CliError> {
    let rate = ctx
        .config
        .exchange_rate()
        .map_err(|e| CliError::validation("config_error", &e.to_string()))?;
    let (usd, ngn) = match (usd, ngn) {
        (Some(raw), _) => {
            let usd = Usd::parse(raw)
                .map_err(|e| CliError::validation("invalid_amount", &e.to_string()))?;
            (usd, rate.to_foreign(usd))
        }
        (None, Some(raw)) => {
            let ngn = Ngn::parse(raw)
                .map_err(|e| CliError::validation("invalid_amount", &e.to_string()))?;
            (rate.to_base(ngn), ngn)
        }
        (None, None) => {
            return Err(CliError::validation(
                "invalid_amount",
                "one of --usd or --ngn is required",
            ))
        }
    };
    emit_ok(
        ctx.output,
        &json!({
            "command": "convert",
            "ngn_per_usd": rate.ngn_per_usd(),
            "usd": usd,
            "ngn": ngn,
        }),
    )
}

pub(crate) fn show_config(ctx: &CliContext) -> Result<(), CliError> {
    let bonus = ctx
        .config
        .bonus_usd()
        .map_err(|e| CliError::validation("config_error", &e.to_string()))?;
    emit_ok(
        ctx.output,
        &json!({
            "command": "config",
            "program": ctx.config,
            "bonus_usd": bonus,
            "config_path": ctx.config_path,
            "workspace_config": resolve_acctthrive_config_path(ConfigPathScope::Workspace),
            "state_dir": ctx.state_dir,
            "state_file": state_file_path(&ctx.state_dir),
        }),
    )
}
