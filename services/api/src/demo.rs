use crate::infra::{cli_config, load_catalog, parse_mode, read_request, sample_request};
use clap::Args;
use kaiden_funding::error::AppError;
use kaiden_funding::funding::{
    FundingRecommendationService, OptimizationMode, RecommendationRequest, RecommendationSet,
    SourceCatalog,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Only rank under this mode (fastest-money, lowest-cost, balanced). Defaults to all three.
    #[arg(long, value_parser = parse_mode)]
    pub(crate) mode: Option<OptimizationMode>,
}

#[derive(Args, Debug)]
pub(crate) struct RecommendArgs {
    /// JSON file containing `{ "profile": ..., "user": ..., "mode": ... }`
    #[arg(long)]
    pub(crate) request: PathBuf,
    /// Override the request's optimization mode
    #[arg(long, value_parser = parse_mode)]
    pub(crate) mode: Option<OptimizationMode>,
    /// JSON catalog to rank against instead of the configured one
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Print the full recommendation set as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), AppError> {
    let RecommendArgs {
        request,
        mode,
        catalog,
        json,
    } = args;

    let config = cli_config()?;
    let catalog_path = catalog.or(config.funding.catalog_path.clone());
    let catalog = load_catalog(catalog_path.as_deref())?;
    let service = FundingRecommendationService::new(Arc::new(catalog), config.funding.engine_config());

    let mut request = read_request(&request)?;
    if mode.is_some() {
        request.mode = mode;
    }

    let set = service.recommend(&request)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&set)?);
    } else {
        print!("{}", render_recommendations(&request, &set));
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = cli_config()?;
    let catalog = load_catalog(config.funding.catalog_path.as_deref())?;
    let service = FundingRecommendationService::new(Arc::new(catalog), config.funding.engine_config());

    let modes = match args.mode {
        Some(mode) => vec![mode],
        None => OptimizationMode::ALL.to_vec(),
    };

    println!("Funding recommendation demo");
    for (index, set) in demo_sets(&service, &modes)?.iter().enumerate() {
        if index > 0 {
            println!();
        }
        print!("{}", render_recommendations(&sample_request(None), set));
    }

    Ok(())
}

fn demo_sets<C>(
    service: &FundingRecommendationService<C>,
    modes: &[OptimizationMode],
) -> Result<Vec<RecommendationSet>, AppError>
where
    C: SourceCatalog + 'static,
{
    modes
        .iter()
        .map(|mode| {
            service
                .recommend(&sample_request(Some(*mode)))
                .map_err(AppError::from)
        })
        .collect()
}

pub(crate) fn render_recommendations(
    request: &RecommendationRequest,
    set: &RecommendationSet,
) -> String {
    let applicant = &request.user.profile;
    let mut out = String::new();

    out.push_str(&format!(
        "{} {} ({}) requesting ${:.0} on the {} track | mode: {}\n",
        applicant.first_name,
        applicant.last_name,
        applicant
            .business_name
            .as_deref()
            .unwrap_or("no business name"),
        request.profile.target_amount,
        request.profile.track.label(),
        set.mode
    ));
    out.push_str(&format!(
        "{} of {} sources eligible\n",
        set.recommendations.len(),
        set.evaluated_sources
    ));

    if set.recommendations.is_empty() {
        out.push_str("No eligible funding sources for this request\n");
        return out;
    }

    for recommendation in &set.recommendations {
        out.push_str(&format!(
            "\n#{} {} [{}] score {}\n",
            recommendation.rank,
            recommendation.source.name,
            recommendation.source.source_type.label(),
            recommendation.score
        ));
        out.push_str(&format!(
            "  approval {:.0}% | ~{:.1} days | est. cost ${:.0} | confidence {:.0}%\n",
            recommendation.approval_probability * 100.0,
            recommendation.speed,
            recommendation.net_cost,
            recommendation.confidence * 100.0
        ));
        out.push_str(&format!("  {}\n", recommendation.explanation));
        for tradeoff in &recommendation.tradeoffs {
            out.push_str(&format!("  tradeoff: {tradeoff}\n"));
        }
        for action in &recommendation.next_actions {
            out.push_str(&format!("  next: {action}\n"));
        }
        for blocker in &recommendation.blockers {
            out.push_str(&format!("  blocker: {blocker}\n"));
        }
    }

    out
}
