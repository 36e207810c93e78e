use nu_ansi_term::Color::{Blue, Cyan};
use rowkit_db::{
    add_project, add_task, models::Task, schema::tasks, select_task_by_status, DbConnection,
    Value,
};
use tracing::info;

use crate::{
    cli::{ProjectAction, TaskAction},
    error::CliResult,
    output::RowSet,
    utils::Colored,
};

pub fn handle_project(db: &DbConnection, action: ProjectAction) -> CliResult<()> {
    match action {
        ProjectAction::Add {
            name,
            start_date,
            end_date,
        } => {
            let id = add_project(db, (name.as_str(), start_date, end_date))?;
            info!("Added project {} with id {}", Colored(Blue, &name), id);
        }
    }
    Ok(())
}

pub fn handle_task(db: &DbConnection, action: TaskAction, json: bool) -> CliResult<()> {
    match action {
        TaskAction::Add {
            project_id,
            name,
            description,
            status,
            start_date,
            end_date,
        } => {
            let id = add_task(
                db,
                (
                    project_id,
                    name.as_str(),
                    description,
                    status,
                    start_date,
                    end_date,
                ),
            )?;
            info!(
                "Added task {} with id {} to project {}",
                Colored(Blue, &name),
                id,
                Colored(Cyan, project_id)
            );
        }
        TaskAction::Status {
            status,
        } => {
            let found = select_task_by_status(db, &status)?;
            task_rows(&status, &found).print(json)?;
        }
    }
    Ok(())
}

fn task_rows(status: &str, found: &[Task]) -> RowSet {
    let rows = found
        .iter()
        .map(|task| {
            vec![
                Value::Integer(task.id),
                Value::Integer(task.project_id),
                task.name.clone().into(),
                task.description.clone().into(),
                task.status.clone().into(),
                task.start_date.clone().into(),
                task.end_date.clone().into(),
            ]
        })
        .collect();

    RowSet::new(format!("tasks ({status})"), tasks::COLUMNS, rows)
}
