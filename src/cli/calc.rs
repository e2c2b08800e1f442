//! Calculator CLI commands

use clap::Subcommand;

use crate::calculator::{calculate_savings, SavingsInput, SavingsOutcome};
use crate::error::FinanceResult;

/// Calculator subcommands
#[derive(Subcommand)]
pub enum CalcCommands {
    /// Monthly contribution needed to reach a savings target
    Savings {
        /// Target amount
        #[arg(long)]
        target: f64,
        /// Amount saved today
        #[arg(long, default_value = "0")]
        current: f64,
        /// Months until the target date
        #[arg(long)]
        months: u32,
        /// Annual interest rate in percent
        #[arg(long, default_value = "0")]
        rate: f64,
        /// Print the balance for every month
        #[arg(long)]
        timeline: bool,
    },
}

/// Handle a calculator command
pub fn handle_calc_command(cmd: CalcCommands) -> FinanceResult<()> {
    match cmd {
        CalcCommands::Savings {
            target,
            current,
            months,
            rate,
            timeline,
        } => {
            let input = SavingsInput::with_annual_rate(target, current, months, rate);
            match calculate_savings(&input)? {
                SavingsOutcome::AlreadyMet => {
                    println!("Goal already met: current savings cover the target.");
                }
                SavingsOutcome::NotAchievable { reason } => {
                    println!("{}", reason);
                }
                SavingsOutcome::Plan(plan) => {
                    println!("Required Monthly Savings: ${:.2}", plan.monthly_payment);
                    println!("Total Contributions:      ${:.2}", plan.total_contributions);
                    println!("Interest Earned:          ${:.2}", plan.interest_earned);
                    println!("Final Balance:            ${:.2}", plan.final_balance());

                    if timeline {
                        println!();
                        println!("{:>6} {:>16}", "Month", "Balance");
                        for point in &plan.timeline {
                            println!("{:>6} {:>16.2}", point.month, point.balance);
                        }
                    }
                }
            }
        }
    }

    Ok(())
}
