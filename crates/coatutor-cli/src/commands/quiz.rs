//! The `coatutor quiz` command.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use coatutor_backend::create_backend;
use coatutor_core::assist::submit_quiz_quietly;
use coatutor_core::model::QuizQuestion;
use coatutor_core::quiz::{QuizReport, QuizSession};

use super::{split_list, Workspace};

pub async fn execute(
    topic: String,
    answers: Option<String>,
    offline: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let workspace = Workspace::load(config_path)?;
    let profile = workspace.topic(&topic);
    let scripted = answers.as_deref().map(parse_answers).transpose()?;

    let mut quiz = QuizSession::new(&profile)?;
    let total = quiz.total_questions();
    let mut question = quiz.start()?.clone();
    let mut index = 0;

    loop {
        print_question(index, total, &question);

        let choice = match &scripted {
            Some(list) => *list
                .get(index)
                .with_context(|| format!("no answer given for question {}", index + 1))?,
            None => prompt_choice(question.options.len())?,
        };

        let outcome = quiz.answer(choice)?;
        if outcome.correct {
            println!("Correct!");
        } else {
            println!("Incorrect. The answer is: {}", outcome.correct_option);
        }
        if !outcome.explanation.is_empty() {
            println!("{}", outcome.explanation);
        }
        println!();

        index += 1;
        match quiz.advance()? {
            Some(next) => question = next.clone(),
            None => break,
        }
    }

    let submission = quiz.submission(&workspace.config.student_id);
    let backend = if offline {
        None
    } else {
        Some(create_backend(&workspace.config.backend)?)
    };
    let report = submit_quiz_quietly(backend.as_deref(), &submission).await;

    print_report(&report);
    Ok(())
}

fn parse_answers(s: &str) -> Result<Vec<usize>> {
    split_list(s)
        .iter()
        .map(|a| {
            a.parse::<usize>()
                .with_context(|| format!("invalid answer '{a}': expected an option number"))
        })
        .collect()
}

fn print_question(index: usize, total: usize, question: &QuizQuestion) {
    println!("Question {}/{total}: {}", index + 1, question.prompt);
    for (i, option) in question.options.iter().enumerate() {
        println!("  {i}) {option}");
    }
}

fn prompt_choice(options: usize) -> Result<usize> {
    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("Your answer: ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            anyhow::bail!("quiz aborted");
        }
        match line.trim().parse::<usize>() {
            Ok(choice) if choice < options => return Ok(choice),
            _ => println!("Pick a number from 0 to {}.", options.saturating_sub(1)),
        }
    }
}

fn print_report(report: &QuizReport) {
    println!("Quiz report: {}", report.topic);
    println!(
        "  Score:           {}/{} ({:.1}%)",
        report.correct_answers, report.total_questions, report.accuracy_percent
    );
    println!("  Time taken:      {}s", report.time_taken_seconds);
    println!("  Attempts:        {}", report.attempts);
    println!("  Predicted level: {}", report.level_display());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_answer_list() {
        assert_eq!(parse_answers("1, 0,2").unwrap(), vec![1, 0, 2]);
        assert!(parse_answers("1,b").is_err());
    }
}
