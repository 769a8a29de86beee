// roster-client/tests/controller.rs
// List controller against an in-memory directory

use async_trait::async_trait;
use roster_client::{
    ClientError, ClientResult, EmployeeService, FetchOutcome, FilterUpdate, HealthProbe,
    ListController,
};
use shared::{
    Employee, EmployeeCreate, EmployeePage, EmployeeQuery, EmployeeStats, EmployeeUpdate,
    HealthStatus,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;

fn employee(id: usize, department: &str) -> Employee {
    serde_json::from_value(serde_json::json!({
        "id": format!("e{id}"),
        "firstName": format!("First{id}"),
        "lastName": format!("Last{id}"),
        "email": format!("user{id}@example.com"),
        "phone": "555-0100",
        "department": department,
        "title": "Engineer",
        "location": "Remote",
        "hireDate": "2020-01-01",
        "salary": 50000,
        "isActive": true
    }))
    .unwrap()
}

#[derive(Default)]
struct FakeDirectory {
    employees: Mutex<Vec<Employee>>,
    fail_list: AtomicBool,
    fail_delete: AtomicBool,
    list_calls: AtomicUsize,
    delete_calls: AtomicUsize,
    /// Each list call takes the next gate and waits for it to be released
    gates: Mutex<VecDeque<oneshot::Receiver<()>>>,
}

impl FakeDirectory {
    fn with(employees: Vec<Employee>) -> Arc<Self> {
        Arc::new(Self {
            employees: Mutex::new(employees),
            ..Default::default()
        })
    }

    fn hold_next_list(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().push_back(rx);
        tx
    }

    fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }
}

fn matches(query: &EmployeeQuery, e: &Employee) -> bool {
    let eq = |want: &Option<String>, have: &str| want.as_deref().is_none_or(|w| w == have);
    let search = query.search.as_deref().is_none_or(|s| {
        let s = s.to_lowercase();
        e.full_name().to_lowercase().contains(&s) || e.email.contains(&s)
    });
    eq(&query.department, &e.department)
        && eq(&query.title, &e.title)
        && eq(&query.location, &e.location)
        && search
}

#[async_trait]
impl EmployeeService for FakeDirectory {
    async fn list(&self, query: &EmployeeQuery) -> ClientResult<EmployeePage> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.gates.lock().unwrap().pop_front();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(ClientError::Api {
                status: 500,
                message: "Database unavailable".into(),
            });
        }

        let page = query.page.unwrap_or(1);
        let limit = query.limit.unwrap_or(10);
        let matching: Vec<Employee> = self
            .employees
            .lock()
            .unwrap()
            .iter()
            .filter(|e| matches(query, e))
            .cloned()
            .collect();
        let total = matching.len() as u64;
        let records = matching
            .into_iter()
            .skip(((page - 1) * limit) as usize)
            .take(limit as usize)
            .collect();
        Ok(EmployeePage::new(records, total, page, limit))
    }

    async fn get(&self, id: &str) -> ClientResult<Employee> {
        self.employees
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound(id.to_string()))
    }

    async fn create(&self, payload: &EmployeeCreate) -> ClientResult<Employee> {
        let mut employees = self.employees.lock().unwrap();
        let mut created = employee(employees.len() + 1000, &payload.department);
        created.first_name = payload.first_name.clone();
        employees.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: &str, payload: &EmployeeUpdate) -> ClientResult<Employee> {
        let mut employees = self.employees.lock().unwrap();
        let record = employees
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| ClientError::NotFound(id.to_string()))?;
        if let Some(title) = &payload.title {
            record.title = title.clone();
        }
        Ok(record.clone())
    }

    async fn delete(&self, id: &str) -> ClientResult<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(ClientError::Api {
                status: 500,
                message: "Delete failed".into(),
            });
        }
        self.employees.lock().unwrap().retain(|e| e.id != id);
        Ok(())
    }

    async fn departments(&self) -> ClientResult<Vec<String>> {
        Ok(self.employees.lock().unwrap().iter().map(|e| e.department.clone()).collect())
    }

    async fn titles(&self) -> ClientResult<Vec<String>> {
        Ok(vec!["Engineer".into()])
    }

    async fn locations(&self) -> ClientResult<Vec<String>> {
        Ok(vec!["Remote".into()])
    }

    async fn stats(&self) -> ClientResult<EmployeeStats> {
        Ok(EmployeeStats::default())
    }

    async fn health(&self, _probe: HealthProbe) -> ClientResult<HealthStatus> {
        Ok(HealthStatus {
            status: "ok".into(),
            details: Default::default(),
        })
    }
}

/// 25 Engineering records followed by 7 Sales records
fn fixture() -> Arc<FakeDirectory> {
    let mut employees: Vec<Employee> = (1..=25).map(|i| employee(i, "Engineering")).collect();
    employees.extend((26..=32).map(|i| employee(i, "Sales")));
    FakeDirectory::with(employees)
}

#[tokio::test]
async fn test_init_fetches_first_page() {
    let directory = fixture();
    let controller = ListController::new(directory.clone());

    assert_eq!(controller.init().await, FetchOutcome::Applied);
    let view = controller.view();
    assert_eq!(view.records().len(), 10);
    assert_eq!(view.total(), 32);
    assert!(!view.loading);
    assert!(view.error.is_none());
    assert_eq!(directory.list_calls(), 1);
}

#[tokio::test]
async fn test_department_filter_pagination_scenario() {
    let directory = fixture();
    let controller = ListController::new(directory.clone());
    controller.init().await;

    controller.set_department("Engineering").await;
    let view = controller.view();
    assert_eq!(view.total(), 25);
    assert_eq!(view.total_pages(), 3);
    assert_eq!(view.filter.page, 1);

    assert_eq!(controller.set_page(3).await, Some(FetchOutcome::Applied));
    let view = controller.view();
    let result = view.result.as_ref().unwrap();
    assert_eq!(result.page, 3);
    assert!((1..=10).contains(&result.records.len()));
    assert_eq!(view.filter.department, "Engineering");
}

#[tokio::test]
async fn test_filter_change_resets_page() {
    let controller = ListController::new(fixture());
    controller.init().await;
    controller.set_page(3).await;
    assert_eq!(controller.filter().page, 3);

    controller.set_search("First1").await;
    assert_eq!(controller.filter().page, 1);
}

#[tokio::test]
async fn test_page_past_the_end_renders_server_answer() {
    let controller = ListController::new(fixture());
    controller.init().await;

    controller.set_page(9).await;
    let view = controller.view();
    assert_eq!(view.filter.page, 9);
    assert!(view.records().is_empty());
    assert!(view.error.is_none());
}

#[tokio::test]
async fn test_unchanged_filter_issues_no_fetch() {
    let directory = fixture();
    let controller = ListController::new(directory.clone());
    controller.init().await;

    assert_eq!(controller.set_department("").await, None);
    assert_eq!(controller.clear_filters().await, None);
    assert_eq!(controller.prev_page().await, None);
    assert_eq!(directory.list_calls(), 1);
}

#[tokio::test]
async fn test_failed_fetch_keeps_last_good_result() {
    let directory = fixture();
    let controller = ListController::new(directory.clone());
    controller.init().await;
    assert_eq!(controller.view().records().len(), 10);

    directory.fail_list.store(true, Ordering::SeqCst);
    assert_eq!(controller.refresh().await, FetchOutcome::Failed);

    let view = controller.view();
    assert_eq!(view.records().len(), 10);
    assert_eq!(view.error.as_deref(), Some("Database unavailable"));
    assert!(!view.loading);

    // manual retry recovers
    directory.fail_list.store(false, Ordering::SeqCst);
    assert_eq!(controller.refresh().await, FetchOutcome::Applied);
    assert!(controller.view().error.is_none());
}

#[tokio::test]
async fn test_previous_result_visible_while_loading() {
    let directory = fixture();
    let controller = ListController::new(directory.clone());
    controller.init().await;

    let release = directory.hold_next_list();
    let observe = async {
        tokio::task::yield_now().await;
        let view = controller.view();
        assert!(view.loading);
        assert_eq!(view.records().len(), 10);
        release.send(()).unwrap();
    };
    let (outcome, ()) = tokio::join!(controller.set_page(2), observe);

    assert_eq!(outcome, Some(FetchOutcome::Applied));
    assert!(!controller.view().loading);
}

#[tokio::test]
async fn test_out_of_order_response_is_discarded() {
    let directory = fixture();
    let controller = ListController::new(directory.clone());

    let release_first = directory.hold_next_list();
    let release_second = directory.hold_next_list();

    let driver = async {
        tokio::task::yield_now().await;
        // the newer request lands first, the older one afterwards
        release_second.send(()).unwrap();
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;
        release_first.send(()).unwrap();
    };
    let (first, second, ()) = tokio::join!(
        controller.set_department("Engineering"),
        controller.set_department("Sales"),
        driver
    );

    assert_eq!(second, Some(FetchOutcome::Applied));
    assert_eq!(first, Some(FetchOutcome::Superseded));
    let view = controller.view();
    assert_eq!(view.filter.department, "Sales");
    assert_eq!(view.total(), 7);
    assert!(view.records().iter().all(|e| e.department == "Sales"));
    assert!(!view.loading);
}

#[tokio::test]
async fn test_delete_requires_confirmation() {
    let directory = fixture();
    let controller = ListController::new(directory.clone());
    controller.init().await;

    controller.request_delete("e1");
    assert_eq!(controller.view().pending_delete.as_deref(), Some("e1"));
    assert_eq!(directory.delete_calls(), 0);

    assert_eq!(controller.cancel_delete().as_deref(), Some("e1"));
    assert!(controller.pending_delete().is_none());
    assert_eq!(directory.delete_calls(), 0);

    // nothing pending: no call
    assert_eq!(controller.confirm_delete().await.unwrap(), None);
    assert_eq!(directory.delete_calls(), 0);

    controller.request_delete("e1");
    let calls_before = directory.list_calls();
    assert_eq!(controller.confirm_delete().await.unwrap().as_deref(), Some("e1"));
    assert_eq!(directory.delete_calls(), 1);
    assert_eq!(directory.list_calls(), calls_before + 1);
    assert_eq!(controller.view().total(), 31);
    assert!(controller.pending_delete().is_none());
}

#[tokio::test]
async fn test_delete_failure_clears_pending() {
    let directory = fixture();
    directory.fail_delete.store(true, Ordering::SeqCst);
    let controller = ListController::new(directory.clone());
    controller.init().await;

    controller.request_delete("e2");
    let err = controller.confirm_delete().await.unwrap_err();
    assert_eq!(err.user_message(), "Delete failed");
    assert!(controller.pending_delete().is_none());
    assert_eq!(controller.view().total(), 32);
}

#[tokio::test]
async fn test_delete_on_last_page_keeps_page() {
    let directory = FakeDirectory::with((1..=21).map(|i| employee(i, "Engineering")).collect());
    let controller = ListController::new(directory.clone());
    controller.init().await;
    controller.set_page(3).await;
    assert_eq!(controller.view().records().len(), 1);

    controller.request_delete("e21");
    controller.confirm_delete().await.unwrap();

    let view = controller.view();
    assert_eq!(view.filter.page, 3);
    assert!(view.records().is_empty());
    assert_eq!(view.total_pages(), 2);
}

#[tokio::test]
async fn test_mutations_refresh_with_current_filter() {
    let directory = fixture();
    let controller = ListController::new(directory.clone());
    controller.init().await;
    controller.set_department("Sales").await;
    controller.set_page(1).await;

    let calls = directory.list_calls();
    let payload = EmployeeCreate {
        first_name: "New".into(),
        last_name: "Hire".into(),
        email: "new@example.com".into(),
        phone: "555-0199".into(),
        department: "Sales".into(),
        title: "Engineer".into(),
        location: "Remote".into(),
        hire_date: chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        salary: 60000.0,
        is_active: true,
        manager: None,
        custom_avatar: None,
    };
    controller.create(&payload).await.unwrap();
    assert_eq!(directory.list_calls(), calls + 1);
    assert_eq!(controller.view().total(), 8);
    assert_eq!(controller.filter().department, "Sales");

    let update = EmployeeUpdate {
        title: Some("Lead".into()),
        ..Default::default()
    };
    let updated = controller.update("e26", &update).await.unwrap();
    assert_eq!(updated.title, "Lead");
    assert_eq!(directory.list_calls(), calls + 2);
}

#[tokio::test(start_paused = true)]
async fn test_debounced_search_fetches_once() {
    let directory = fixture();
    let controller =
        ListController::new(directory.clone()).with_search_debounce(Some(Duration::from_millis(300)));

    let typing = async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        controller.set_search("First2").await
    };
    let (first, second) = tokio::join!(controller.set_search("First"), typing);

    assert_eq!(first, None);
    assert_eq!(second, Some(FetchOutcome::Applied));
    assert_eq!(directory.list_calls(), 1);
    assert_eq!(controller.filter().search, "First2");
}

#[tokio::test]
async fn test_immediate_search_fetches_per_keystroke() {
    let directory = fixture();
    let controller = ListController::new(directory.clone());

    controller.set_search("F").await;
    controller.set_search("Fi").await;
    controller.apply_filter(FilterUpdate::search("Fir")).await;
    assert_eq!(directory.list_calls(), 3);
}
