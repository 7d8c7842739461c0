use errprop::{ErrorContext, ShuntingParser};
use tracing::info;
use tracing_subscriber::filter::LevelFilter;

const DEMO_EXPR: &str = "(x^2 + y^2) / (2*y)";

// ERRPROP_LOG=error|warn|info|debug|trace, warn when unset or unreadable
fn log_level(setting: Option<String>) -> LevelFilter {
    setting
        .and_then(|l| l.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::WARN)
}

fn init_logging() {
    use tracing_subscriber::{filter::Targets, fmt::Layer, prelude::*};

    let level = log_level(std::env::var("ERRPROP_LOG").ok());
    tracing_subscriber::registry()
        .with(Layer::new()
            .with_ansi(false)
            .with_writer(std::io::stderr)
            .with_filter(Targets::new()
                .with_default(LevelFilter::WARN)
                .with_target("errprop", level)
            )
        )
        .init();
}

// name=value,uncertainty
fn parse_binding(arg: &str) -> Result<(char, f64, f64), String> {
    let bad = || format!("Bad binding '{}', expected name=value,uncertainty", arg);
    let (name, measured) = arg.split_once('=').ok_or_else(bad)?;
    let mut chars = name.trim().chars();
    let var = match (chars.next(), chars.next()) {
        (Some(c), None) => c,
        _ => return Err(format!("Variable names are a single character: '{}'", name)),
    };
    let (value, uncertainty) = measured.split_once(',').ok_or_else(bad)?;
    let value = value.trim().parse::<f64>().map_err(|_| bad())?;
    let uncertainty = uncertainty.trim().parse::<f64>().map_err(|_| bad())?;
    Ok((var, value, uncertainty))
}

fn run(args: &[String]) -> Result<(), String> {
    let mut cx = ErrorContext::new();
    let expr = match args.split_first() {
        Some((expr, bindings)) => {
            for arg in bindings {
                let (var, value, uncertainty) = parse_binding(arg)?;
                cx.setvar(var, value, uncertainty);
            }
            expr.as_str()
        }
        None => {
            cx.setvar('x', 0.1, 0.0025);
            cx.setvar('y', 0.01, 0.0025);
            DEMO_EXPR
        }
    };
    let rpn = ShuntingParser::parse_str(expr).map_err(|e| format!("Parse error: {}", e))?;
    let result = cx.eval(&rpn).map_err(|e| format!("Eval error: {}", e))?;
    let infix = rpn.to_infix().map_err(|e| format!("Eval error: {}", e))?;
    info!("evaluated {} with {} bindings", expr, cx.0.len());
    println!("{}", rpn);
    println!("{} = {}", infix, result);
    Ok(())
}

fn main() {
    init_logging();
    let args = std::env::args().skip(1).collect::<Vec<String>>();
    if let Err(e) = run(&args) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{log_level, parse_binding, run};
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn bindings() {
        assert_eq!(parse_binding("x=0.1,0.0025"), Ok(('x', 0.1, 0.0025)));
        assert_eq!(parse_binding(" y = 2 , 0.5"), Ok(('y', 2.0, 0.5)));
        assert!(parse_binding("xy=1,0").is_err());
        assert!(parse_binding("x=1").is_err());
        assert!(parse_binding("x1,0").is_err());
        assert!(parse_binding("x=a,0").is_err());
    }

    #[test]
    fn log_level_from_env() {
        assert_eq!(log_level(None), LevelFilter::WARN);
        assert_eq!(log_level(Some(format!("debug"))), LevelFilter::DEBUG);
        assert_eq!(log_level(Some(format!("TRACE"))), LevelFilter::TRACE);
        assert_eq!(log_level(Some(format!("loud"))), LevelFilter::WARN);
    }

    #[test]
    fn run_reports_errors() {
        assert!(run(&[]).is_ok());
        assert!(run(&[format!("x+1"), format!("x=1,0.1")]).is_ok());
        assert_eq!(run(&[format!("(1+2")]), Err(format!("Parse error: Mismatched brackets")));
        assert_eq!(run(&[format!("z")]), Err(format!("Eval error: Undefined variable: z")));
    }
}
