//! Interactive shot chart generator
//!
//! Prompts for a player ("Lastname, Firstname") and a game window, fetches
//! that player's shot attempts, and writes a heat-map PNG. A window of 0
//! means the full 82-game season.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use shotchart::{
    ChartConfig, ChartError, StatsClient, aggregate, load_font, normalize_game_window,
    render_chart, save_chart,
};

fn main() -> Result<()> {
    env_logger::init();
    let config = ChartConfig::load();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let player_input = prompt(
        &mut lines,
        "Please provide an NBA player to analyze in the format of Lastname, Firstname.\n\
         Here are a few examples to get started:\n\
         Rose, Derrick\n\
         James, LeBron\n\
         Harden, James\n\
         Enter: ",
    )?;
    let (last_name, first_name) = match parse_player_input(&player_input) {
        Ok(names) => names,
        Err(err) => {
            println!("{}", err);
            return Ok(());
        }
    };

    let games_input = prompt(
        &mut lines,
        "Enter the amount of games you'd like to view statistics for. This can be in the \
         format of 10 games, 30 games, or say 0 to indicate a season-length.\n\
         Enter: ",
    )?;
    let games = match parse_game_window(&games_input) {
        Ok(games) => games,
        Err(err) => {
            println!("{}", err);
            return Ok(());
        }
    };
    let games = normalize_game_window(games);

    let client = StatsClient::new(&config)?;

    let player = match client
        .find_player(&last_name, &first_name)
        .context("player lookup failed")?
    {
        Some(player) => player,
        None => {
            println!(
                "Player not found, check your spelling of {}, {} or please choose another player.",
                last_name, first_name
            );
            return Ok(());
        }
    };

    let team_id = client
        .team_for_player(player.id)
        .context("team lookup failed")?;
    let shots = client
        .fetch_shots(player.id, team_id, games)
        .context("shot chart fetch failed")?;
    println!(
        "Fetched {} shot attempts for {} over the last {} games.",
        shots.len(),
        player.display_name,
        games
    );

    let bins = aggregate(&shots, config.grid_size);
    let font = load_font(config.font_path.as_deref());
    let img = render_chart(&bins, &player.display_name, games, config.grid_size, font.as_ref());

    let out_path = chart_path(&config.output_dir, &player.display_name, games);
    save_chart(&img, &out_path)?;
    println!("Saved {}", out_path.display());

    Ok(())
}

fn prompt(lines: &mut impl Iterator<Item = io::Result<String>>, message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush().ok();
    let line = lines
        .next()
        .context("no input")?
        .context("failed to read input")?;
    Ok(line.trim().to_string())
}

/// Split "Lastname, Firstname" input; a missing comma aborts before any
/// network call.
fn parse_player_input(input: &str) -> Result<(String, String), ChartError> {
    let Some((last, first)) = input.split_once(',') else {
        return Err(ChartError::InvalidInput(format!(
            "Did not provide correct format for {}.",
            input
        )));
    };

    let last = last.trim();
    let first = first.trim();
    if last.is_empty() || first.is_empty() {
        return Err(ChartError::InvalidInput(format!(
            "Did not provide correct format for {}.",
            input
        )));
    }
    Ok((last.to_string(), first.to_string()))
}

fn parse_game_window(input: &str) -> Result<u32, ChartError> {
    input.trim().parse::<u32>().map_err(|_| {
        ChartError::InvalidInput(format!("{} is not a whole number of games.", input))
    })
}

fn chart_path(output_dir: &str, player_name: &str, games: u32) -> PathBuf {
    PathBuf::from(output_dir).join(format!(
        "shotchart_{}_{}g.png",
        sanitize_player_name(player_name),
        games
    ))
}

fn sanitize_player_name(name: &str) -> String {
    let mut out = String::new();
    let mut last_was_underscore = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
            last_was_underscore = false;
        } else if !last_was_underscore {
            out.push('_');
            last_was_underscore = true;
        }
    }

    out.trim_matches('_').to_string()
}
