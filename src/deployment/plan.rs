//! The fixed, ordered contract installation plan.
//!
//! Each contract is installed after every contract whose package hash it
//! takes as a constructor argument.

use std::collections::BTreeMap;

use crate::blockchain::types::DeployedContract;
use crate::deployment::args::{ArgValue, NamedArgs};
use crate::deployment::error::{DeployError, DeployResult};

const DAY_MS: u64 = 86_400_000;
const VESTING_DURATION_MS: u64 = DAY_MS * 365;
const FEE_DISTRIBUTOR_START_TIME: &str = "100000000";

/// A contract of the suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContractKind {
    Erc20Token,
    Erc20Reward,
    Erc20Crv,
    CurveRewards,
    CurveTokenV3,
    LpTokenWrapper,
    VotingEscrow,
    FeeDistributor,
    GaugeController,
    GaugeProxy,
    Minter,
    LiquidityGaugeV3,
    LiquidityGaugeReward,
    LiquidityGaugeRewardWrapper,
    LiquidityGaugeWrapper,
    RewardOnlyGauge,
    Ownable,
    IRewardDistributionRecipient,
    VestingEscrow,
    VestingEscrowFactory,
    VestingEscrowSimple,
}

/// Values that vary per run and feed into constructor arguments.
#[derive(Debug)]
pub struct PlanContext<'a> {
    /// `<name prefix><deployment count>`.
    pub contract_name: String,
    pub admin_account_hash: &'a str,
    pub admin_account_str: &'a str,
    /// Contracts installed (or resumed) earlier in this run.
    pub deployed: &'a BTreeMap<ContractKind, DeployedContract>,
    /// Wall clock in milliseconds since the Unix epoch.
    pub now_ms: u64,
}

impl PlanContext<'_> {
    fn package_ref(&self, contract: ContractKind, dependency: ContractKind) -> DeployResult<ArgValue> {
        self.deployed
            .get(&dependency)
            .map(|deployed| ArgValue::PackageRef(deployed.package_hash.clone()))
            .ok_or(DeployError::MissingDependency {
                contract: contract.id(),
                dependency: dependency.id(),
            })
    }

    fn admin(&self) -> ArgValue {
        ArgValue::Account(self.admin_account_hash.to_string())
    }
}

impl ContractKind {
    /// Installation order.
    pub const ALL: [ContractKind; 21] = [
        ContractKind::Erc20Token,
        ContractKind::Erc20Reward,
        ContractKind::Erc20Crv,
        ContractKind::CurveRewards,
        ContractKind::CurveTokenV3,
        ContractKind::LpTokenWrapper,
        ContractKind::VotingEscrow,
        ContractKind::FeeDistributor,
        ContractKind::GaugeController,
        ContractKind::GaugeProxy,
        ContractKind::Minter,
        ContractKind::LiquidityGaugeV3,
        ContractKind::LiquidityGaugeReward,
        ContractKind::LiquidityGaugeRewardWrapper,
        ContractKind::LiquidityGaugeWrapper,
        ContractKind::RewardOnlyGauge,
        ContractKind::Ownable,
        ContractKind::IRewardDistributionRecipient,
        ContractKind::VestingEscrow,
        ContractKind::VestingEscrowFactory,
        ContractKind::VestingEscrowSimple,
    ];

    /// Identifier used in configuration and on the command line.
    pub fn id(self) -> &'static str {
        match self {
            ContractKind::Erc20Token => "erc20_token",
            ContractKind::Erc20Reward => "erc20_reward",
            ContractKind::Erc20Crv => "erc20_crv",
            ContractKind::CurveRewards => "curve_rewards",
            ContractKind::CurveTokenV3 => "curve_token_v3",
            ContractKind::LpTokenWrapper => "lp_token_wrapper",
            ContractKind::VotingEscrow => "voting_escrow",
            ContractKind::FeeDistributor => "fee_distributor",
            ContractKind::GaugeController => "gauge_controller",
            ContractKind::GaugeProxy => "gauge_proxy",
            ContractKind::Minter => "minter",
            ContractKind::LiquidityGaugeV3 => "liquidity_gauge_v3",
            ContractKind::LiquidityGaugeReward => "liquidity_gauge_reward",
            ContractKind::LiquidityGaugeRewardWrapper => "liquidity_gauge_reward_wrapper",
            ContractKind::LiquidityGaugeWrapper => "liquidity_gauge_wrapper",
            ContractKind::RewardOnlyGauge => "reward_only_gauge",
            ContractKind::Ownable => "ownable",
            ContractKind::IRewardDistributionRecipient => "i_reward_distribution_recipient",
            ContractKind::VestingEscrow => "vesting_escrow",
            ContractKind::VestingEscrowFactory => "vesting_escrow_factory",
            ContractKind::VestingEscrowSimple => "vesting_escrow_simple",
        }
    }

    pub fn from_id(id: &str) -> Option<ContractKind> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }

    /// Prefix of the hash files, e.g. `erc20TokenContractHash`.
    pub fn output_stem(self) -> &'static str {
        match self {
            ContractKind::Erc20Token => "erc20Token",
            ContractKind::Erc20Reward => "erc20Reward",
            ContractKind::Erc20Crv => "erc20Crv",
            ContractKind::CurveRewards => "curveRewards",
            ContractKind::CurveTokenV3 => "curveTokenV3",
            ContractKind::LpTokenWrapper => "lpTokenWrapper",
            ContractKind::VotingEscrow => "votingEscrow",
            ContractKind::FeeDistributor => "feeDistributor",
            ContractKind::GaugeController => "gaugeController",
            ContractKind::GaugeProxy => "gaugeProxy",
            ContractKind::Minter => "minter",
            ContractKind::LiquidityGaugeV3 => "liquidityGaugeV3",
            ContractKind::LiquidityGaugeReward => "liquidityGaugeReward",
            ContractKind::LiquidityGaugeRewardWrapper => "liquidityGaugeRewardWrapper",
            ContractKind::LiquidityGaugeWrapper => "liquidityGaugeWrapper",
            ContractKind::RewardOnlyGauge => "rewardOnlyGauge",
            ContractKind::Ownable => "ownable",
            ContractKind::IRewardDistributionRecipient => "iRewardDistributionRecipient",
            ContractKind::VestingEscrow => "vestingEscrow",
            ContractKind::VestingEscrowFactory => "vestingEscrowFactory",
            ContractKind::VestingEscrowSimple => "vestingEscrowSimple",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ContractKind::Erc20Token => "ERC20 Token",
            ContractKind::Erc20Reward => "ERC20 Reward",
            ContractKind::Erc20Crv => "ERC20 CRV",
            ContractKind::CurveRewards => "Curve Rewards",
            ContractKind::CurveTokenV3 => "Curve Token V3",
            ContractKind::LpTokenWrapper => "LP Token Wrapper",
            ContractKind::VotingEscrow => "Voting Escrow",
            ContractKind::FeeDistributor => "Fee Distributor",
            ContractKind::GaugeController => "Gauge Controller",
            ContractKind::GaugeProxy => "Gauge Proxy",
            ContractKind::Minter => "Minter",
            ContractKind::LiquidityGaugeV3 => "Liquidity Gauge V3",
            ContractKind::LiquidityGaugeReward => "Liquidity Gauge Reward",
            ContractKind::LiquidityGaugeRewardWrapper => "Liquidity Gauge Reward Wrapper",
            ContractKind::LiquidityGaugeWrapper => "Liquidity Gauge Wrapper",
            ContractKind::RewardOnlyGauge => "Reward Only Gauge",
            ContractKind::Ownable => "Ownable",
            ContractKind::IRewardDistributionRecipient => "I Reward Distribution Recipient",
            ContractKind::VestingEscrow => "Vesting Escrow",
            ContractKind::VestingEscrowFactory => "Vesting Escrow Factory",
            ContractKind::VestingEscrowSimple => "Vesting Escrow Simple",
        }
    }

    /// Contracts whose package hash this contract's constructor takes.
    pub fn dependencies(self) -> &'static [ContractKind] {
        use ContractKind::*;
        match self {
            CurveRewards => &[Erc20Token, Erc20Reward],
            LpTokenWrapper => &[Erc20Token],
            VotingEscrow => &[Erc20Crv],
            FeeDistributor => &[VotingEscrow, Erc20Token],
            GaugeController => &[VotingEscrow, Erc20Token],
            Minter => &[GaugeController, Erc20Crv],
            LiquidityGaugeV3 => &[Erc20Token, Minter],
            LiquidityGaugeReward => &[Erc20Token, Minter, CurveRewards, Erc20Reward],
            LiquidityGaugeRewardWrapper => &[LiquidityGaugeReward],
            LiquidityGaugeWrapper => &[LiquidityGaugeV3],
            RewardOnlyGauge => &[Erc20Token],
            VestingEscrow => &[Erc20Token],
            VestingEscrowFactory => &[Erc20Token],
            Erc20Token | Erc20Reward | Erc20Crv | CurveTokenV3 | GaugeProxy | Ownable
            | IRewardDistributionRecipient | VestingEscrowSimple => &[],
        }
    }

    /// Constructor arguments, always including `contract_name`.
    pub fn runtime_args(self, ctx: &PlanContext<'_>) -> DeployResult<NamedArgs> {
        use ContractKind::*;

        let text = |s: &str| ArgValue::String(s.to_string());
        let dep = |dependency| ctx.package_ref(self, dependency);

        let args = match self {
            Erc20Token => erc20("Token", "Erc").with("initial_supply", ArgValue::U256("0".to_string())),
            Erc20Reward => erc20("Reward", "Erc").with("initial_supply", ArgValue::U256("0".to_string())),
            Erc20Crv => erc20("ERC20CRV", "Crv"),
            CurveRewards => NamedArgs::new()
                .with("token", dep(Erc20Token)?)
                .with("reward", dep(Erc20Reward)?),
            CurveTokenV3 => NamedArgs::new()
                .with("name", text("Curve Token V3"))
                .with("symbol", text("CTV")),
            LpTokenWrapper => NamedArgs::new().with("uni", dep(Erc20Token)?),
            VotingEscrow => NamedArgs::new()
                .with("token_addr", dep(Erc20Crv)?)
                .with("name", text("Vote-escrowed CRV"))
                .with("symbol", text("veCRV"))
                .with("version", text("veCRV_1.0.0")),
            FeeDistributor => NamedArgs::new()
                .with("voting_escrow", dep(VotingEscrow)?)
                .with("start_time", ArgValue::U256(FEE_DISTRIBUTOR_START_TIME.to_string()))
                .with("token", dep(Erc20Token)?)
                .with("admin", ctx.admin())
                .with("emergency_return", ctx.admin()),
            GaugeController => NamedArgs::new()
                .with("voting_escrow", dep(VotingEscrow)?)
                .with("token", dep(Erc20Token)?),
            GaugeProxy => NamedArgs::new()
                .with("ownership_admin", ctx.admin())
                .with("emergency_admin", ctx.admin()),
            Minter => NamedArgs::new()
                .with("controller", dep(GaugeController)?)
                .with("token", dep(Erc20Crv)?),
            LiquidityGaugeV3 => NamedArgs::new()
                .with("lp_addr", dep(Erc20Token)?)
                .with("minter", dep(Minter)?)
                .with("admin", ctx.admin()),
            LiquidityGaugeReward => NamedArgs::new()
                .with("lp_addr", dep(Erc20Token)?)
                .with("minter", dep(Minter)?)
                .with("reward_contract", dep(CurveRewards)?)
                .with("rewarded_token", dep(Erc20Reward)?)
                .with("admin", ctx.admin()),
            LiquidityGaugeRewardWrapper => NamedArgs::new()
                .with("name", text("LiquidityGaugeRewardWrapper"))
                .with("symbol", text("LGRW"))
                .with("gauge", dep(LiquidityGaugeReward)?)
                .with("admin", ctx.admin()),
            LiquidityGaugeWrapper => NamedArgs::new()
                .with("name", text("LiquidityGaugeWrapper"))
                .with("symbol", text("LGW"))
                .with("gauge", dep(LiquidityGaugeV3)?)
                .with("admin", ctx.admin()),
            RewardOnlyGauge => NamedArgs::new()
                .with("lp_token", dep(Erc20Token)?)
                .with("admin", ctx.admin()),
            VestingEscrow => NamedArgs::new()
                .with("token", dep(Erc20Token)?)
                .with("start_time", ArgValue::U256(ctx.now_ms.to_string()))
                .with(
                    "end_time",
                    ArgValue::U256((ctx.now_ms + VESTING_DURATION_MS).to_string()),
                )
                .with("can_disable", ArgValue::Bool(true))
                .with(
                    "fund_admins",
                    ArgValue::StringList(vec![ctx.admin_account_str.to_string()]),
                ),
            VestingEscrowFactory => NamedArgs::new()
                .with("target", dep(Erc20Token)?)
                .with("admin", ctx.admin()),
            Ownable | IRewardDistributionRecipient | VestingEscrowSimple => NamedArgs::new(),
        };

        Ok(args.with("contract_name", ArgValue::String(ctx.contract_name.clone())))
    }
}

impl std::fmt::Display for ContractKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

fn erc20(name: &str, symbol: &str) -> NamedArgs {
    NamedArgs::new()
        .with("name", ArgValue::String(name.to_string()))
        .with("symbol", ArgValue::String(symbol.to_string()))
        .with("decimals", ArgValue::U8(9))
}
