mod dialog;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use encoding_rs::Encoding;
use serde_json::json;
use std::{fs, io, path::PathBuf};
use surge_engine::api::builtin_actor;
use surge_engine::content::builtin_actors;
use surge_engine::document::{ActorDocument, DocFormat};
use surge_engine::ports::{ActorPort, PresetDialog, SpendDialog};
use surge_engine::surge::{healing_surge, SurgeOutcome};
use surge_engine::{hit_dice::surge_formula, DieDescriptor, Dice};
use tracing_subscriber::EnvFilter;

use dialog::{StderrNotifier, StdoutChat, TerminalDialog};

#[derive(Args)]
struct ActorSource {
    /// Actor document (JSON, or YAML by extension)
    #[arg(long, conflicts_with = "builtin")]
    actor: Option<PathBuf>,
    /// Built-in sample actor id
    #[arg(long)]
    builtin: Option<String>,
}

#[derive(Subcommand)]
enum Cmd {
    /// Spend hit dice to heal the selected actor
    Surge {
        #[command(flatten)]
        source: ActorSource,
        /// Class item id to spend from (defaults to the first with dice left)
        #[arg(long)]
        class: Option<String>,
        /// Dice to spend; more than remain is reduced to what is left
        #[arg(long, default_value_t = 1, allow_hyphen_values = true)]
        count: i32,
        /// Ask for class and count on the terminal instead
        #[arg(long, default_value_t = false)]
        interactive: bool,
        /// RNG seed for determinism
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Write the updated actor back to --actor
        #[arg(long, default_value_t = false, requires = "actor")]
        write: bool,
        /// Print the result and updated actor as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List an actor's hit dice pools
    Pools {
        #[command(flatten)]
        source: ActorSource,
    },
    /// Print a built-in actor document as JSON
    Dump {
        /// Built-in actor id; lists ids when omitted
        id: Option<String>,
    },
    /// Roll hit dice without touching an actor
    Roll {
        /// RNG seed for determinism
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Hit die, e.g. d8
        #[arg(long, default_value = "d8")]
        die: String,
        /// Number of dice
        #[arg(long, default_value_t = 1)]
        count: u32,
        /// Added per die
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        modifier: i32,
    },
}

#[derive(Parser)]
#[command(name = "surge")]
#[command(about = "Healing Surge: spend Hit Dice to heal")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Surge {
            source,
            class,
            count,
            interactive,
            seed,
            write,
            json,
        } => {
            let mut actor = load_source(&source)?;
            let mut dialog: Box<dyn SpendDialog> = if interactive {
                Box::new(TerminalDialog::new(io::stdin().lock(), io::stderr()))
            } else {
                Box::new(PresetDialog::new(class, count))
            };
            let mut notifier = StderrNotifier;
            let mut chat = StdoutChat { json, cards: vec![] };
            let mut dice = Dice::from_seed(seed);

            let outcome = healing_surge(
                actor.as_mut(),
                dialog.as_mut(),
                &mut notifier,
                &mut chat,
                |faces| dice.die(faces),
            )?;

            if write {
                if let (Some(path), Some(doc)) = (&source.actor, &actor) {
                    save_actor(path, doc)?;
                    tracing::info!(path = %path.display(), "actor written");
                }
            }

            if json {
                let payload = json!({
                    "outcome": outcome,
                    "chat": chat.cards,
                    "actor": actor,
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else if outcome == SurgeOutcome::Cancelled {
                println!("cancelled");
            }
        }
        Cmd::Pools { source } => {
            let Some(actor) = load_source(&source)? else {
                bail!("pass --actor or --builtin");
            };
            let con = actor.constitution_mod();
            println!("{} (CON {:+})", actor.actor_name(), con);
            for pool in actor.resource_pools()? {
                let mark = if pool.available() > 0 { " " } else { "✖" };
                println!("{} [{}] {}", mark, pool.id, pool.label());
            }
        }
        Cmd::Dump { id } => match id {
            Some(id) => println!("{}", builtin_actor(&id)?.to_json_pretty()?),
            None => {
                let mut ids: Vec<_> = builtin_actors().into_keys().collect();
                ids.sort();
                for id in ids {
                    println!("{}", id);
                }
            }
        },
        Cmd::Roll {
            seed,
            die,
            count,
            modifier,
        } => {
            let die: DieDescriptor = die.parse()?;
            let mut dice = Dice::from_seed(seed);
            let rolls = dice.roll_many(count, die.faces);
            let bonus = (count as i64).saturating_mul(modifier as i64);
            let total = rolls
                .iter()
                .fold(bonus, |acc, &r| acc.saturating_add(r as i64));
            println!(
                "{} → {:?} = {}",
                surge_formula(count, die, bonus),
                rolls,
                total
            );
        }
    }
    Ok(())
}

/// `None` when no actor was named, which the surge reports as no selection.
fn load_source(source: &ActorSource) -> anyhow::Result<Option<ActorDocument>> {
    if let Some(id) = &source.builtin {
        return Ok(Some(builtin_actor(id)?));
    }
    let Some(path) = &source.actor else {
        return Ok(None);
    };
    let text = read_text_auto(path)?;
    let doc = ActorDocument::parse(&text, DocFormat::from_path(&path.to_string_lossy()))
        .with_context(|| format!("failed to load actor file: {}", path.display()))?;
    Ok(Some(doc))
}

fn read_text_auto(path: &std::path::Path) -> anyhow::Result<String> {
    let bytes =
        fs::read(path).with_context(|| format!("failed to read actor file: {}", path.display()))?;
    if let Some((enc, bom_len)) = Encoding::for_bom(&bytes) {
        let (cow, _, _) = enc.decode(&bytes[bom_len..]);
        Ok(cow.into_owned())
    } else {
        Ok(String::from_utf8(bytes)?)
    }
}

fn save_actor(path: &std::path::Path, actor: &ActorDocument) -> anyhow::Result<()> {
    let text = match DocFormat::from_path(&path.to_string_lossy()) {
        DocFormat::Json => actor.to_json_pretty()?,
        DocFormat::Yaml => actor.to_yaml()?,
    };
    fs::write(path, text).with_context(|| format!("failed to write actor file: {}", path.display()))
}
