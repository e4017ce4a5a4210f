#[cfg(test)]
mod tests {
    use chrono::{Duration, Local, NaiveDateTime};
    use taskboard::db::db::Db;
    use taskboard::libs::config::Config;
    use taskboard::libs::entity_id::EntityId;
    use taskboard::libs::project::AddOrMoveTask;
    use taskboard::services::aggregations::AggregationService;
    use taskboard::services::projects::ProjectService;
    use taskboard::services::tasks::TaskService;
    use test_context::{test_context, TestContext};

    struct AggregationTestContext {
        db: Db,
        config: Config,
    }

    impl TestContext for AggregationTestContext {
        fn setup() -> Self {
            AggregationTestContext {
                db: Db::open_in_memory().unwrap(),
                config: Config::default(),
            }
        }
    }

    fn today_at_nine() -> NaiveDateTime {
        Local::now().date_naive().and_hms_opt(9, 0, 0).unwrap()
    }

    fn link(projects: &ProjectService, to: &EntityId, task: &EntityId) {
        projects
            .add_or_move_task(&AddOrMoveTask {
                from_project_id: None,
                to_project_id: to.clone(),
                task_id: task.clone(),
            })
            .unwrap();
    }

    #[test_context(AggregationTestContext)]
    #[test]
    fn test_tasks_due_today_filters_by_project_due_date(ctx: &mut AggregationTestContext) {
        let projects = ProjectService::new(&ctx.db, &ctx.config);
        let tasks = TaskService::new(&ctx.db, &ctx.config);
        let aggregations = AggregationService::new(&ctx.db);
        let today = today_at_nine();
        let tomorrow = today + Duration::days(1);

        // P is due today; both of its tasks appear regardless of their own due dates
        let p = projects.create_one("Due today", today).unwrap();
        let t1 = tasks.create_one("T1", tomorrow).unwrap();
        let t2 = tasks.create_one("T2", today).unwrap();
        link(&projects, &p.project.id, &t1.id);
        link(&projects, &p.project.id, &t2.id);

        // Q is due tomorrow; its task must not appear
        let q = projects.create_one("Due tomorrow", tomorrow).unwrap();
        let t3 = tasks.create_one("T3", today).unwrap();
        link(&projects, &q.project.id, &t3.id);

        let rows = aggregations.tasks_due_today().unwrap();
        assert_eq!(rows.len(), 2);
        let mut task_ids: Vec<&str> = rows.iter().map(|r| r.task.id.as_str()).collect();
        task_ids.sort();
        let mut expected = vec![t1.id.as_str(), t2.id.as_str()];
        expected.sort();
        assert_eq!(task_ids, expected);
        for row in &rows {
            assert_eq!(row.project.id, p.project.id);
        }
    }

    #[test_context(AggregationTestContext)]
    #[test]
    fn test_projects_due_today_filters_embedded_tasks(ctx: &mut AggregationTestContext) {
        let projects = ProjectService::new(&ctx.db, &ctx.config);
        let tasks = TaskService::new(&ctx.db, &ctx.config);
        let aggregations = AggregationService::new(&ctx.db);
        let today = today_at_nine();
        let tomorrow = today + Duration::days(1);

        // P itself is due today, holding T1 (due tomorrow) and T2 (due today):
        // only the (P, T2) pair may come back
        let p = projects.create_one("P", today).unwrap();
        let t1 = tasks.create_one("T1", tomorrow).unwrap();
        let t2 = tasks.create_one("T2", today).unwrap();
        link(&projects, &p.project.id, &t1.id);
        link(&projects, &p.project.id, &t2.id);

        let rows = aggregations.projects_due_today().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].project.id, p.project.id);
        assert_eq!(rows[0].task.id, t2.id);
    }

    #[test_context(AggregationTestContext)]
    #[test]
    fn test_projects_due_today_ignores_project_due_date(ctx: &mut AggregationTestContext) {
        let projects = ProjectService::new(&ctx.db, &ctx.config);
        let tasks = TaskService::new(&ctx.db, &ctx.config);
        let aggregations = AggregationService::new(&ctx.db);
        let today = today_at_nine();
        let tomorrow = today + Duration::days(1);

        // The project is not due today, but its task is: the pair qualifies.
        // This is the deliberate asymmetry between the two reports.
        let q = projects.create_one("Far future", tomorrow).unwrap();
        let t = tasks.create_one("Urgent", today).unwrap();
        link(&projects, &q.project.id, &t.id);

        let rows = aggregations.projects_due_today().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].project.id, q.project.id);
        assert_eq!(rows[0].task.id, t.id);

        // ...while the tasks-due-today report stays empty
        assert!(aggregations.tasks_due_today().unwrap().is_empty());
    }

    #[test_context(AggregationTestContext)]
    #[test]
    fn test_end_of_day_fractional_seconds_are_due_today(ctx: &mut AggregationTestContext) {
        let projects = ProjectService::new(&ctx.db, &ctx.config);
        let tasks = TaskService::new(&ctx.db, &ctx.config);
        let aggregations = AggregationService::new(&ctx.db);
        let last_moment = Local::now()
            .date_naive()
            .and_hms_milli_opt(23, 59, 59, 800)
            .unwrap();
        let next_midnight = Local::now()
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            + Duration::days(1);

        // Due dates after 23:59:59.0 still belong to today
        let p = projects.create_one("Last minute", last_moment).unwrap();
        let t = tasks.create_one("Last call", last_moment).unwrap();
        link(&projects, &p.project.id, &t.id);

        assert_eq!(aggregations.tasks_due_today().unwrap().len(), 1);
        assert_eq!(aggregations.projects_due_today().unwrap().len(), 1);

        // Midnight itself already counts as tomorrow
        let q = projects.create_one("Next day", next_midnight).unwrap();
        let u = tasks.create_one("Next call", next_midnight).unwrap();
        link(&projects, &q.project.id, &u.id);

        let task_rows = aggregations.tasks_due_today().unwrap();
        assert_eq!(task_rows.len(), 1);
        assert_eq!(task_rows[0].project.id, p.project.id);
        let project_rows = aggregations.projects_due_today().unwrap();
        assert_eq!(project_rows.len(), 1);
        assert_eq!(project_rows[0].task.id, t.id);
    }

    #[test_context(AggregationTestContext)]
    #[test]
    fn test_reports_are_empty_without_links(ctx: &mut AggregationTestContext) {
        let projects = ProjectService::new(&ctx.db, &ctx.config);
        let tasks = TaskService::new(&ctx.db, &ctx.config);
        let aggregations = AggregationService::new(&ctx.db);
        let today = today_at_nine();

        // Due today, but nothing is linked: both reports are joins, not scans
        projects.create_one("Empty project", today).unwrap();
        tasks.create_one("Orphan task", today).unwrap();

        assert!(aggregations.tasks_due_today().unwrap().is_empty());
        assert!(aggregations.projects_due_today().unwrap().is_empty());
    }
}
