//! DynamoDB infrastructure management commands.

mod client;
mod config;
mod deploy;
mod error;
mod planning;
mod seed;

pub use error::{DynamodbError, Result};

use crate::prelude::*;
use dialoguer::Confirm;
use sportlink_core::common::Sport;

/// DynamoDB infrastructure management commands.
#[derive(Debug, clap::Parser)]
pub struct DynamodbCommand {
    #[command(subcommand)]
    pub action: DynamodbAction,
}

/// Available DynamoDB actions.
#[derive(Debug, clap::Subcommand)]
pub enum DynamodbAction {
    /// Deploy or destroy DynamoDB table infrastructure.
    Deploy(DeployCommand),

    /// Seed the table with demo teams.
    Seed(SeedCommand),
}

/// Deploy or update DynamoDB infrastructure.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Deploy or destroy DynamoDB table infrastructure.

By default, this command creates the SportLink DynamoDB table with its
EntityId/Id key schema and enables TTL on the ExpiresAt attribute.

The command shows a plan of changes before applying and asks for confirmation.

Environment variables:
  AWS_ENDPOINT_URL    - Use local DynamoDB (e.g., http://localhost:8000)
  AWS_REGION          - AWS region (defaults to us-west-2)
  AWS_PROFILE         - AWS profile to use for credentials")]
pub struct DeployCommand {
    /// Skip confirmation prompts.
    #[arg(long)]
    pub force: bool,

    /// Destroy the table instead of creating/updating.
    #[arg(long)]
    pub destroy: bool,

    /// Table name to use.
    #[arg(long, default_value = "SportLinkCore")]
    pub table_name: String,
}

/// Seed the table with demo teams.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Generate and insert demo teams into DynamoDB.

Creates teams for each requested sport with categories spread across
levels L1 to L7, so match announcements can be published against them.")]
pub struct SeedCommand {
    /// Sports to create teams for.
    #[arg(long = "sport", value_name = "SPORT", default_values_t = ["Paddle".to_string(), "Football".to_string()])]
    pub sports: Vec<String>,

    /// Number of teams per sport.
    #[arg(long, default_value = "5")]
    pub count: u32,

    /// Table name to use.
    #[arg(long, default_value = "SportLinkCore")]
    pub table_name: String,

    /// Skip confirmation prompts.
    #[arg(long)]
    pub force: bool,
}

/// Main entry point for dynamodb command.
pub async fn run(command: DynamodbCommand, global: crate::Global) -> Result<()> {
    match command.action {
        DynamodbAction::Deploy(deploy_cmd) => run_deploy(deploy_cmd, &global).await,
        DynamodbAction::Seed(seed_cmd) => run_seed(seed_cmd, &global).await,
    }
}

/// Ask the user to confirm, unless `--force` was given.
fn confirm(force: bool, prompt: impl Into<String>, default: bool) -> Result<()> {
    if force {
        return Ok(());
    }

    let confirmed = Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(|e| DynamodbError::Prompt(e.to_string()))?;

    if confirmed {
        Ok(())
    } else {
        Err(DynamodbError::UserCancelled)
    }
}

/// Color a plan line by its leading marker.
fn paint_plan_line(line: &str) -> String {
    match line.chars().next() {
        Some('+') => p_g(line),
        Some('-') => p_r(line),
        Some('~') => p_y(line),
        _ => line.to_string(),
    }
}

async fn run_deploy(cmd: DeployCommand, global: &crate::Global) -> Result<()> {
    let aws_config = client::AwsConfig::default();
    let silent = global.is_silent();

    if !silent {
        aprintln!("{} {}", p_b("Target:"), aws_config.target_display());
        aprintln!();
    }

    let dynamo_client = client::create_client(&aws_config).await?;
    let current_state = client::get_table_state(&dynamo_client, &cmd.table_name).await?;

    if cmd.destroy {
        apply_destroy(&dynamo_client, &cmd, current_state.as_ref(), silent).await
    } else {
        apply_deploy(&dynamo_client, &cmd, current_state.as_ref(), silent).await
    }
}

async fn apply_destroy(
    dynamo_client: &aws_sdk_dynamodb::Client,
    cmd: &DeployCommand,
    current_state: Option<&planning::TableState>,
    silent: bool,
) -> Result<()> {
    let plan = planning::calculate_destroy_plan(current_state, &cmd.table_name);

    if !silent {
        aprintln!("{}", p_y("Destroy Plan:"));
        for line in planning::format_destroy_plan(&plan) {
            aprintln!("  {}", p_r(&line));
        }
        aprintln!();
    }

    if matches!(plan, planning::DestroyPlan::AlreadyGone { .. }) {
        if !silent {
            aprintln!("{}", p_g("Nothing to destroy."));
        }
        return Ok(());
    }

    confirm(
        cmd.force,
        "Are you sure you want to delete this table? ALL DATA WILL BE LOST",
        false,
    )?;

    if !silent {
        aprintln!("{}", p_b("Deleting table..."));
    }
    deploy::execute_destroy_plan(dynamo_client, &plan).await?;
    if !silent {
        aprintln!("{}", p_g("Table destroyed successfully."));
    }

    Ok(())
}

async fn apply_deploy(
    dynamo_client: &aws_sdk_dynamodb::Client,
    cmd: &DeployCommand,
    current_state: Option<&planning::TableState>,
    silent: bool,
) -> Result<()> {
    let table_config = config::sportlink_table_config().with_table_name(&cmd.table_name);
    let plan = planning::calculate_deploy_plan(current_state, &table_config);

    if !silent {
        aprintln!("{}", p_c("Deploy Plan:"));
        for line in planning::format_deploy_plan(&plan) {
            aprintln!("  {}", paint_plan_line(&line));
        }
        aprintln!();
    }

    if matches!(plan, planning::DeployPlan::NoChanges { .. }) {
        if !silent {
            aprintln!("{}", p_g("Table is up to date."));
        }
        return Ok(());
    }

    confirm(cmd.force, "Apply these changes?", true)?;

    if !silent {
        aprintln!("{}", p_b("Applying changes..."));
    }
    deploy::execute_deploy_plan(dynamo_client, &plan).await?;
    if !silent {
        aprintln!("{}", p_g("Table deployed successfully."));
    }

    Ok(())
}

async fn run_seed(cmd: SeedCommand, global: &crate::Global) -> Result<()> {
    let aws_config = client::AwsConfig::default();
    let sports: Vec<Sport> = cmd.sports.iter().map(Sport::new).collect();

    if !global.is_silent() {
        aprintln!("{} {}", p_b("Target:"), aws_config.target_display());
        aprintln!("{} {}", p_b("Table:"), cmd.table_name);
        aprintln!("{} {}", p_b("Sports:"), cmd.sports.join(", "));
        aprintln!("{} {}", p_b("Teams per sport:"), cmd.count);
        aprintln!();
    }

    let dynamo_client = client::create_client(&aws_config).await?;

    // Verify table exists
    let table_state = client::get_table_state(&dynamo_client, &cmd.table_name).await?;
    if table_state.is_none() {
        return Err(DynamodbError::TableNotFound {
            table_name: cmd.table_name,
        });
    }

    let teams = seed::generate_seed_teams(&sports, cmd.count);

    if !global.is_silent() {
        aprintln!("{}", p_c("Teams to create:"));
        for team in teams.iter().take(5) {
            aprintln!("  {} - {} ({})", team.sport, team.name, team.category);
        }
        if teams.len() > 5 {
            aprintln!("  ... and {} more", teams.len() - 5);
        }
        aprintln!();
    }

    confirm(cmd.force, format!("Insert {} teams?", teams.len()), true)?;

    let inserted = seed::seed_teams(&dynamo_client, &cmd.table_name, &teams).await?;

    if !global.is_silent() {
        aprintln!("{} {} teams inserted.", p_g("Success:"), inserted);
    }

    Ok(())
}
