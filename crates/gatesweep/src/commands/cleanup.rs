use anyhow::Context;
use clap::Args;
use colored::Colorize;
use gatesweep_cloud::CloudError;
use gatesweep_cloud_aws::AwsGatewayRequester;
use gatesweep_config::Settings;
use gatesweep_core::{
    CleanupHook, CleanupOutcome, CompiledTemplate, CoreError, DeploymentContext, HookOptions,
    ServiceNaming,
};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Args, Debug, Default)]
pub struct CleanupArgs {
    /// Compiled template or deployment state file
    #[arg(short, long)]
    pub template: Option<PathBuf>,
    /// Service name the API was deployed for
    #[arg(long, env = "GATESWEEP_SERVICE")]
    pub service: Option<String>,
    /// Deployment stage (defaults to dev)
    #[arg(short, long, env = "GATESWEEP_STAGE")]
    pub stage: Option<String>,
    /// REST API name, overriding the <stage>-<service> convention
    #[arg(long)]
    pub api_name: Option<String>,
    /// AWS region (defaults to us-east-1)
    #[arg(short, long, env = "AWS_REGION")]
    pub region: Option<String>,
    /// Seconds to wait before looking up the API
    #[arg(long)]
    pub cooldown: Option<u64>,
    /// Lifecycle event being dispatched
    #[arg(long, default_value = CleanupHook::EVENT)]
    pub event: String,
}

pub async fn handle(settings: &Settings, args: CleanupArgs) -> anyhow::Result<()> {
    let cooldown = args
        .cooldown
        .map(Duration::from_secs)
        .unwrap_or_else(|| settings.cooldown());
    let hook = CleanupHook::new(HookOptions::default().with_cooldown(cooldown));

    if !hook.handles(&args.event) {
        println!(
            "{}",
            format!("Event {} is not handled, nothing to do", args.event).yellow()
        );
        return Ok(());
    }

    let path = args
        .template
        .clone()
        .unwrap_or_else(|| settings.template_path());
    let template = CompiledTemplate::load(&path)
        .with_context(|| format!("Cannot load compiled template {}", path.display()))?;

    let api_name = api_name(settings, &args)?;
    let region = args
        .region
        .clone()
        .unwrap_or_else(|| settings.region().to_string());

    println!("API: {}", api_name.cyan());
    println!("Region: {}", region.cyan());

    let requester = AwsGatewayRequester::connect(region).await;
    let context = DeploymentContext { template, api_name };

    let outcome = match hook.run(&requester, &context).await {
        Ok(outcome) => outcome,
        Err(CoreError::Cloud(CloudError::ApiNotFound(name))) => {
            anyhow::bail!(
                "REST API '{}' not found. Check --service/--stage or pass --api-name",
                name
            );
        }
        Err(e) => return Err(e.into()),
    };

    match outcome {
        CleanupOutcome::Skipped => {
            println!(
                "{}",
                "No current stage in the compiled template, nothing deleted".yellow()
            );
        }
        CleanupOutcome::Completed {
            current_stage,
            deleted,
            ..
        } => {
            println!("Current stage: {}", current_stage.cyan());
            for record in &deleted {
                println!("  ✓ {}", record.to_string().green());
            }
            println!(
                "{}",
                format!("{} unused stage(s) deleted", deleted.len()).bold()
            );
        }
    }

    Ok(())
}

/// Explicit API name first, then the `<stage>-<service>` convention
fn api_name(settings: &Settings, args: &CleanupArgs) -> anyhow::Result<String> {
    if let Some(name) = args.api_name.as_ref().or(settings.api_name.as_ref()) {
        return Ok(name.clone());
    }

    let service = args
        .service
        .as_ref()
        .or(settings.service.as_ref())
        .context("Cannot derive the API name: set --service or --api-name")?;

    let mut naming = ServiceNaming::new(service);
    if let Some(stage) = args.stage.as_ref().or(settings.stage.as_ref()) {
        naming = naming.with_stage(stage);
    }
    Ok(naming.api_gateway_name())
}
