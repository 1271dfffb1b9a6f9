use diesel::r2d2::ConnectionManager;
use dotenv::dotenv;
use exitfailure::ExitFailure;
use failure::ResultExt;
use std::io::stdin;
use std::path::PathBuf;
use structopt::StructOpt;
use trivia::catalog::{Catalog, DbPool, PgCatalog};
use trivia::display::{category_map, format_answer, format_question};
use trivia::memory::MemoryCatalog;
use trivia::models::NewQuestionBody;
use trivia::quiz::{self, CategoryScope};
use trivia::{questions, search};

#[derive(StructOpt)]
enum Command {
    /// List categories
    Categories,
    /// Show one page of questions
    Questions {
        #[structopt(short, long, default_value = "1")]
        page: i64,
    },
    /// Search question text
    Search {
        term: String,
        #[structopt(short, long, default_value = "1")]
        page: i64,
    },
    /// Add a question
    Add {
        question: String,
        answer: String,
        #[structopt(short, long)]
        category: i64,
        #[structopt(short, long)]
        difficulty: i64,
    },
    DeleteQuestion { id: i32 },
    /// Play a quiz on the terminal; category 0 plays every category
    Play {
        #[structopt(short, long, default_value = "0")]
        category: i32,
    },
}

#[derive(StructOpt)]
struct Args {
    #[structopt(short, long, env = "DATABASE_URL")]
    database_url: Option<String>,
    /// Use an in-memory catalog loaded from this JSON fixture
    #[structopt(long, parse(from_os_str))]
    seed: Option<PathBuf>,
    #[structopt(subcommand)]
    command: Command,
}

fn main() -> Result<(), ExitFailure> {
    env_logger::init();
    let _ = dotenv();
    let args = Args::from_args();
    if let Some(seed) = args.seed {
        let catalog = MemoryCatalog::open(&seed)
            .with_context(|_| format!("unable to load {}", seed.display()))?;
        run(&catalog, args.command)?;
        return Ok(());
    }
    let url = args
        .database_url
        .ok_or_else(|| failure::err_msg("DATABASE_URL or --seed is required"))?;
    let pool = DbPool::builder()
        .max_size(1)
        .build(ConnectionManager::new(url))
        .context("unable to connect database")?;
    run(&PgCatalog::new(pool), args.command)?;
    Ok(())
}

fn run<C: Catalog>(catalog: &C, command: Command) -> Result<(), failure::Error> {
    match command {
        Command::Categories => categories(catalog)?,
        Command::Questions { page } => list(catalog, page)?,
        Command::Search { term, page } => find(catalog, &term, page)?,
        Command::Add {
            question,
            answer,
            category,
            difficulty,
        } => {
            let created = questions::create_question(
                catalog,
                NewQuestionBody {
                    question,
                    answer,
                    category,
                    difficulty,
                },
            )?;
            println!("Created question {}", created.created);
        }
        Command::DeleteQuestion { id } => {
            questions::delete_question(catalog, id)?;
            println!("Deleted question {}", id);
        }
        Command::Play { category } => play(catalog, CategoryScope::from_id(category))?,
    }
    Ok(())
}

fn categories<C: Catalog>(catalog: &C) -> Result<(), failure::Error> {
    let list = search::list_categories(catalog)?;
    println!("Categories ({}):", list.total_categories);
    for (id, name) in list.categories {
        println!("{} ({})", id, name);
    }
    Ok(())
}

fn list<C: Catalog>(catalog: &C, page: i64) -> Result<(), failure::Error> {
    let result = search::list_questions(catalog, page)?;
    println!("Page {} ({} questions):", page, result.total_questions);
    for q in &result.questions {
        println!("{}", format_question(q, &result.categories));
    }
    Ok(())
}

fn find<C: Catalog>(catalog: &C, term: &str, page: i64) -> Result<(), failure::Error> {
    let result = search::search_questions(catalog, Some(term), page)?;
    let categories = category_map(catalog.categories()?);
    println!("{} questions match {:?}:", result.total_questions, result.search_term);
    for q in &result.questions {
        println!("{}", format_question(q, &categories));
    }
    Ok(())
}

fn play<C: Catalog>(catalog: &C, scope: CategoryScope) -> Result<(), failure::Error> {
    let categories = category_map(catalog.categories()?);
    let mut rng = rand::thread_rng();
    let mut previous = Vec::new();
    let mut score = 0;
    loop {
        let turn = quiz::next_question(catalog, &previous, scope, &mut rng)?;
        let question = match turn.question {
            Some(question) => question,
            None => break,
        };
        println!("{}", format_question(&question, &categories));
        println!("Your answer (empty to quit):");
        let mut input = String::new();
        stdin().read_line(&mut input)?;
        let input = input.trim();
        if input.is_empty() {
            break;
        }
        let answer = format_answer(&question);
        if input.eq_ignore_ascii_case(&answer) {
            score += 1;
            println!("Correct!");
        } else {
            println!("The answer was: {}", answer);
        }
        previous.push(question.id);
    }
    println!("Score: {}/{}", score, previous.len());
    Ok(())
}
