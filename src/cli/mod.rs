use clap::Parser;

mod report;

pub use report::ReportArgs;

/// Daily AWS cost summary bot
#[derive(Parser)]
#[command(name = "costwatch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    report: ReportArgs,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        self.report.run()?;
        Ok(())
    }
}
