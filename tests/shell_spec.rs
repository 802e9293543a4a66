use std::io::Cursor;

use speculate2::speculate;
use workbench::db::Database;
use workbench::service::ProjectService;
use workbench::shell::Shell;

fn run_shell(input: &str) -> (ProjectService, String) {
    let db = Database::open_memory().expect("Failed to create in-memory database");
    db.migrate().expect("Failed to run migrations");
    let service = ProjectService::new(db);

    let mut output = Vec::new();
    let mut shell = Shell::new(service.clone(), Cursor::new(input.to_string()), &mut output);
    shell.run().expect("Shell run failed");

    (service, String::from_utf8(output).expect("Shell output was not UTF-8"))
}

speculate! {
    describe "menu loop" {
        it "quits on the Enter key" {
            let (_, output) = run_shell("\n");
            assert!(output.contains("These are the available selections."));
            assert!(output.contains("Exiting the menu."));
        }

        it "reports an invalid selection and keeps running" {
            let (_, output) = run_shell("7\n\n");
            assert!(output.contains("7 is not a valid selection."));
            assert!(output.contains("Exiting the menu."));
        }
    }

    describe "create project flow" {
        it "creates Hang a door end to end" {
            let input = "1\nHang a door\n4.00\n3.00\n3\nInstall new hinges first\n\n";
            let (service, output) = run_shell(input);

            assert!(output.contains("You have successfully created project:"));

            let project = service
                .fetch_project(1)
                .expect("Failed to fetch")
                .expect("Project was not persisted");
            assert_eq!(project.project_id, Some(1));
            assert_eq!(project.project_name, Some("Hang a door".to_string()));
            assert_eq!(project.estimated_hours, Some("4.00".parse().unwrap()));
            assert_eq!(project.actual_hours, Some("3.00".parse().unwrap()));
            assert_eq!(project.difficulty, Some(3));
            assert_eq!(project.notes, Some("Install new hinges first".to_string()));
        }

        it "re-prompts difficulty for 0, 6 and abc before accepting 3" {
            let input = "1\nHang a door\n4.00\n3.00\n0\n6\nabc\n3\nnotes\n\n";
            let (service, output) = run_shell(input);

            assert_eq!(
                output.matches("Enter a number from 1 to 5.").count(),
                3
            );
            let project = service.fetch_project(1).expect("fetch").expect("project");
            assert_eq!(project.difficulty, Some(3));
        }

        it "reports a parse failure and returns to the menu" {
            let input = "1\nHang a door\nnot-a-number\n\n";
            let (service, output) = run_shell(input);

            assert!(output.contains("not-a-number is not a valid decimal number."));
            assert!(service.fetch_project(1).expect("fetch").is_none());
            assert!(output.contains("Exiting the menu."));
        }
    }
}
