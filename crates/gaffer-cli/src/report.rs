//! Human-readable summaries, written to stderr so stdout stays valid JSON.

use gaffer_core::Player;
use gaffer_evaluator::{BaselineResult, TeamValuation};
use gaffer_optimizer::{FeasibilityReport, Selection, TransferPlan};

pub fn print_selection(selection: &Selection) {
    eprintln!(
        "Formation {} | cost {} | expected points {:.1}",
        selection.formation.name, selection.total_cost, selection.expected_points
    );
    eprintln!("Starters:");
    for player in &selection.starters {
        print_player(player, role_marker(selection, player));
    }
    eprintln!("Bench:");
    for player in &selection.bench {
        print_player(player, "");
    }
}

fn role_marker(selection: &Selection, player: &Player) -> &'static str {
    if player.name == selection.captain.name {
        "(C)"
    } else if player.name == selection.vice_captain.name {
        "(V)"
    } else {
        ""
    }
}

fn print_player(player: &Player, marker: &str) {
    eprintln!(
        "  {:<3} {:<24} {:>5} {:>6.1} {marker}",
        player.position.short_name(),
        player.name,
        player.cost.to_string(),
        player.metric
    );
}

pub fn print_transfer_plan(plan: &TransferPlan) {
    if plan.is_hold() {
        eprintln!("No transfers.");
    }
    for (out, into) in plan.transferred_out.iter().zip(&plan.transferred_in) {
        eprintln!("  OUT {:<24} IN {}", out.name, into.name);
    }
    eprintln!(
        "Transfers {} ({} free, {} extra, -{:.0} points)",
        plan.num_transfers, plan.free_transfers, plan.excess_transfers, plan.transfer_penalty
    );
    eprintln!(
        "Net spend {} | remaining budget {} | net expected points {:.1}",
        plan.net_spend, plan.remaining_budget, plan.net_expected_points
    );
    print_selection(&plan.selection);
}

pub fn print_feasibility(report: &FeasibilityReport) {
    eprintln!("{:<12} {:>9} {:>9} {:>9}", "position", "required", "available", "cheapest");
    for supply in &report.positions {
        let cheapest = supply
            .cheapest_cost
            .map_or_else(|| "-".to_owned(), |cost| cost.to_string());
        eprintln!(
            "{:<12} {:>9} {:>9} {:>9}",
            supply.position.name(),
            supply.required,
            supply.available,
            cheapest
        );
    }
    if let Some(cost) = report.minimum_squad_cost {
        eprintln!("Cheapest legal squad costs at least {cost}");
    }
    match report.check() {
        Ok(()) => eprintln!("Feasible."),
        Err(reason) => eprintln!("Infeasible: {reason}"),
    }
}

pub fn print_valuation(valuation: &TeamValuation) {
    let bonus_from = if valuation.vice_stood_in {
        "vice-captain"
    } else {
        "captain"
    };
    eprintln!(
        "Starters {} + {bonus_from} {} = {} points",
        valuation.base_points, valuation.captain_bonus, valuation.total
    );
}

pub fn print_baseline(result: &BaselineResult) {
    eprintln!("Most-selected team, gameweek {}:", result.gameweek);
    print_selection(&result.selection);
    print_valuation(&result.valuation);
}
