use approx::assert_abs_diff_eq;
use clap::Parser as _;
use rstest::*;
use sdplot::{AppConfig, BaseArgs, Commands, Mode, PathOrStd, Scenario, equilibrium, plot};
use std::{fs::File, io::BufReader, path::PathBuf};

fn read(path: impl Into<PathBuf>) -> Scenario {
    let file = File::open(path.into()).unwrap();
    serde_json::from_reader(BufReader::new(file)).unwrap()
}

#[fixture]
fn config() -> AppConfig {
    AppConfig::default()
}

#[test]
fn plot_arguments() {
    let args = BaseArgs::try_parse_from([
        "sdplot",
        "plot",
        "scenarios/textbook.json",
        "-o",
        "textbook.svg",
        "--mode",
        "cost-and-utility",
        "--total",
    ])
    .unwrap();

    match args.command {
        Commands::Plot {
            io,
            mode,
            total,
            no_legend,
        } => {
            assert_eq!(io.input, PathOrStd::Path("scenarios/textbook.json".into()));
            assert_eq!(io.output, PathOrStd::Path("textbook.svg".into()));
            assert_eq!(mode, Mode::CostAndUtility);
            assert!(total);
            assert!(!no_legend);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn standard_streams_by_default() {
    let args = BaseArgs::try_parse_from(["sdplot", "equilibrium", "-"]).unwrap();
    match args.command {
        Commands::Equilibrium { io } => {
            assert_eq!(io.input, PathOrStd::Std);
            assert_eq!(io.output, PathOrStd::Std);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn config_is_global() {
    let args =
        BaseArgs::try_parse_from(["sdplot", "equilibrium", "-", "--config", "sdplot.toml"])
            .unwrap();
    assert_eq!(args.config, Some(PathBuf::from("sdplot.toml")));
}

#[test]
fn unknown_mode_is_rejected() {
    assert!(BaseArgs::try_parse_from(["sdplot", "plot", "-", "--mode", "pie"]).is_err());
}

#[test]
fn bundled_config_matches_the_defaults() {
    let file = AppConfig::load(Some("sdplot.toml".as_ref())).unwrap();
    assert_eq!(file.render.width, 800);
    assert_eq!(file.sampling.plot_samples, 501);
}

#[rstest]
fn every_scenario_renders(
    #[files("scenarios/*.json")] path: PathBuf,
    config: AppConfig,
    #[values(Mode::SupplyAndDemand, Mode::CostAndUtility)] mode: Mode,
) {
    let svg = plot(read(path), &config, mode, true, true).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[rstest]
#[case::textbook("scenarios/textbook.json", 2.0, 7.0, 3.0, 10.0)]
#[case::linear("scenarios/linear.json", 2.0, 4.0, 2.0, 6.0)]
fn scenario_equilibrium(
    config: AppConfig,
    #[case] path: &str,
    #[case] quantity: f64,
    #[case] welfare: f64,
    #[case] cost: f64,
    #[case] utility: f64,
) {
    let report = equilibrium(read(path), &config).unwrap();
    assert_abs_diff_eq!(report.quantity, quantity, epsilon = 1e-6);
    assert_abs_diff_eq!(report.welfare, welfare, epsilon = 1e-6);
    assert_abs_diff_eq!(report.cost, cost, epsilon = 1e-6);
    assert_abs_diff_eq!(report.utility, utility, epsilon = 1e-6);
}

#[rstest]
fn textbook_shares(config: AppConfig) {
    let report = equilibrium(read("scenarios/textbook.json"), &config).unwrap();
    assert_eq!(report.price, Some(3.5));

    let supply = report.supply.iter().collect::<Vec<_>>();
    assert_eq!(supply.len(), 2);
    assert_eq!(supply[0].0, "Firm A");
    assert_abs_diff_eq!(*supply[0].1, 1.0, epsilon = 1e-6);
    assert_eq!(supply[1].0, "Firm B");
    assert_abs_diff_eq!(*supply[1].1, 1.0, epsilon = 1e-6);
    assert_abs_diff_eq!(report.demand["Household"], 2.0, epsilon = 1e-6);
}

#[rstest]
fn empty_side_is_an_error(config: AppConfig) {
    let scenario: Scenario = serde_json::from_str(
        r#"{ "supply": [{ "points": [{ "quantity": 1.0, "price": 1.0 }] }], "demand": [] }"#,
    )
    .unwrap();
    assert!(equilibrium(scenario, &config).is_err());
}
