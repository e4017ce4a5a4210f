#[cfg(test)]
mod tests {
    use chrono::{Duration, Local};
    use taskboard::db::db::Db;
    use taskboard::libs::config::Config;
    use taskboard::libs::entity_id::EntityId;
    use taskboard::libs::error::Error;
    use taskboard::libs::paging::SortDir;
    use taskboard::libs::project::{AddOrMoveTask, ProjectCriteria};
    use taskboard::libs::status::Status;
    use taskboard::libs::task::{TaskCriteria, TaskSortBy};
    use taskboard::services::projects::ProjectService;
    use taskboard::services::tasks::TaskService;
    use test_context::{test_context, TestContext};

    struct ListingTestContext {
        db: Db,
        config: Config,
    }

    impl TestContext for ListingTestContext {
        fn setup() -> Self {
            ListingTestContext {
                db: Db::open_in_memory().unwrap(),
                config: Config::default(),
            }
        }
    }

    #[test_context(ListingTestContext)]
    #[test]
    fn test_pagination_math(ctx: &mut ListingTestContext) {
        let service = TaskService::new(&ctx.db, &ctx.config);
        let due = Local::now().naive_local() + Duration::days(1);
        for i in 1..=25 {
            service.create_one(&format!("Task {}", i), due).unwrap();
        }

        let criteria = TaskCriteria {
            page: Some(2),
            limit: Some(10),
            ..Default::default()
        };
        let page = service.get_all(&criteria).unwrap();

        assert_eq!(page.items.len(), 10);
        assert_eq!(page.total_count, 25);
        assert_eq!(page.page, 2);
        assert_eq!(page.limit, 10);
        assert_eq!(page.total_pages, 3);

        // Last page holds the remainder
        let last = service
            .get_all(&TaskCriteria {
                page: Some(3),
                limit: Some(10),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(last.items.len(), 5);
    }

    #[test_context(ListingTestContext)]
    #[test]
    fn test_defaults_applied(ctx: &mut ListingTestContext) {
        let service = TaskService::new(&ctx.db, &ctx.config);
        let due = Local::now().naive_local();
        for i in 0..12 {
            service.create_one(&format!("Task {}", i), due).unwrap();
        }

        // No page/limit: page 1 with the configured default limit
        let page = service.get_all(&TaskCriteria::default()).unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, ctx.config.default_limit);
        assert_eq!(page.items.len(), ctx.config.default_limit as usize);
        assert_eq!(page.total_count, 12);
    }

    #[test_context(ListingTestContext)]
    #[test]
    fn test_search_is_case_insensitive_and_empty_safe(ctx: &mut ListingTestContext) {
        let service = TaskService::new(&ctx.db, &ctx.config);
        let due = Local::now().naive_local();
        service.create_one("Deploy API gateway", due).unwrap();
        service.create_one("deploy frontend", due).unwrap();
        service.create_one("Write changelog", due).unwrap();

        let matched = service
            .get_all(&TaskCriteria {
                search: Some("DEPLOY".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(matched.total_count, 2);

        // Empty search matches everything
        let all = service
            .get_all(&TaskCriteria {
                search: Some(String::new()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(all.total_count, 3);

        // No substring match yields an empty page, not an error
        let none = service
            .get_all(&TaskCriteria {
                search: Some("quarterly".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert!(none.items.is_empty());
        assert_eq!(none.total_count, 0);
        assert_eq!(none.total_pages, 0);
    }

    #[test_context(ListingTestContext)]
    #[test]
    fn test_status_filter(ctx: &mut ListingTestContext) {
        let service = TaskService::new(&ctx.db, &ctx.config);
        let due = Local::now().naive_local();
        let a = service.create_one("First", due).unwrap();
        service.create_one("Second", due).unwrap();
        service.update_status(&a.id, Status::Completed).unwrap();

        let completed = service
            .get_all(&TaskCriteria {
                status: Some(Status::Completed),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(completed.total_count, 1);
        assert_eq!(completed.items[0].id, a.id);
    }

    #[test_context(ListingTestContext)]
    #[test]
    fn test_sort_by_due_date(ctx: &mut ListingTestContext) {
        let service = TaskService::new(&ctx.db, &ctx.config);
        let base = Local::now().naive_local();
        service.create_one("Later", base + Duration::days(5)).unwrap();
        service.create_one("Soon", base + Duration::days(1)).unwrap();
        service.create_one("Middle", base + Duration::days(3)).unwrap();

        let asc = service
            .get_all(&TaskCriteria {
                sort_by: Some(TaskSortBy::DueAt),
                sort: Some(SortDir::Asc),
                ..Default::default()
            })
            .unwrap();
        let names: Vec<&str> = asc.items.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Soon", "Middle", "Later"]);

        let desc = service
            .get_all(&TaskCriteria {
                sort_by: Some(TaskSortBy::DueAt),
                sort: Some(SortDir::Desc),
                ..Default::default()
            })
            .unwrap();
        let names: Vec<&str> = desc.items.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Later", "Middle", "Soon"]);
    }

    #[test_context(ListingTestContext)]
    #[test]
    fn test_project_scoped_task_listing(ctx: &mut ListingTestContext) {
        let tasks = TaskService::new(&ctx.db, &ctx.config);
        let projects = ProjectService::new(&ctx.db, &ctx.config);
        let due = Local::now().naive_local();

        let project = projects.create_one("Scoped", due).unwrap();
        let inside = tasks.create_one("Member task", due).unwrap();
        tasks.create_one("Outside task", due).unwrap();
        projects
            .add_or_move_task(&AddOrMoveTask {
                from_project_id: None,
                to_project_id: project.project.id.clone(),
                task_id: inside.id.clone(),
            })
            .unwrap();

        let scoped = tasks
            .get_all(&TaskCriteria {
                project_id: Some(project.project.id.clone()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(scoped.total_count, 1);
        assert_eq!(scoped.items[0].id, inside.id);

        // Unknown project id is a typed failure, not an empty page
        let ghost = EntityId::parse("0123456789abcdef01234567").unwrap();
        let err = tasks
            .get_all(&TaskCriteria {
                project_id: Some(ghost),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, Error::ProjectNotFound));
    }

    #[test_context(ListingTestContext)]
    #[test]
    fn test_project_listing_embeds_tasks(ctx: &mut ListingTestContext) {
        let tasks = TaskService::new(&ctx.db, &ctx.config);
        let projects = ProjectService::new(&ctx.db, &ctx.config);
        let due = Local::now().naive_local();

        let project = projects.create_one("Alpha build", due).unwrap();
        projects.create_one("Beta build", due).unwrap();
        let task = tasks.create_one("Compile", due).unwrap();
        projects
            .add_or_move_task(&AddOrMoveTask {
                from_project_id: None,
                to_project_id: project.project.id.clone(),
                task_id: task.id.clone(),
            })
            .unwrap();

        let page = projects
            .get_all(&ProjectCriteria {
                search: Some("alpha".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(page.total_count, 1);
        assert_eq!(page.items[0].project.name, "Alpha build");
        assert_eq!(page.items[0].tasks.len(), 1);
        assert_eq!(page.items[0].tasks[0].name, "Compile");
    }
}
