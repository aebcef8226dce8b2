//! In-process demo dataset. Built fresh per call; nothing is shared or
//! persisted, and the same `now` always yields the same data.

use crate::dashboard::model::*;
use chrono::{Duration, NaiveDateTime, NaiveTime};

#[derive(Debug, Clone)]
pub struct DemoStore {
    pub locations: Vec<Location>,
    pub employees: Vec<Employee>,
    pub templates: Vec<ChecklistTemplate>,
    pub checklists: Vec<Checklist>,
    pub oil_changes: Vec<OilChange>,
    pub events: Vec<Event>,
    pub notifications: Vec<Notification>,
    next_id: u64,
}

/// Templates every employee gets each day.
const DAILY_TEMPLATES: [&str; 3] = ["cleaning", "fridge-temps", "drink-count"];

fn location(id: &str, name: &str, kind: LocationKind, fryers: u32) -> Location {
    Location {
        id: id.to_string(),
        name: name.to_string(),
        kind,
        fryers,
    }
}

fn employee(n: u32, name: &str, role: StaffRole, location_id: &str, shift: &str) -> Employee {
    Employee {
        id: format!("emp-{n}"),
        name: name.to_string(),
        role,
        location_id: location_id.to_string(),
        shift: shift.to_string(),
    }
}

fn task(n: u32, title: &str, kind: TaskKind) -> TaskTemplate {
    TaskTemplate {
        id: format!("task-{n}"),
        title: title.to_string(),
        kind,
    }
}

fn number(unit: &str) -> TaskKind {
    TaskKind::Number {
        unit: unit.to_string(),
    }
}

fn seed_locations() -> Vec<Location> {
    vec![
        location("location-1", "Knez Mihailova", LocationKind::Restaurant, 4),
        location("location-2", "Skadarlija", LocationKind::Restaurant, 3),
        location("location-3", "Zemun", LocationKind::Restaurant, 3),
        location("production", "Production Facility", LocationKind::Production, 2),
    ]
}

fn seed_employees() -> Vec<Employee> {
    use StaffRole::*;
    vec![
        employee(1, "Marko Petrović", Worker, "location-1", "08:00-16:00"),
        employee(2, "Ana Jovanović", TeamLeader, "location-1", "08:00-16:00"),
        employee(3, "Stefan Nikolić", Worker, "location-1", "16:00-00:00"),
        employee(4, "Jelena Đorđević", Worker, "location-2", "08:00-16:00"),
        employee(5, "Milan Stojanović", TeamLeader, "location-2", "08:00-16:00"),
        employee(6, "Ivana Popović", Worker, "location-2", "16:00-00:00"),
        employee(7, "Nikola Ilić", Worker, "location-3", "08:00-16:00"),
        employee(8, "Maja Pavlović", TeamLeader, "location-3", "08:00-16:00"),
        employee(9, "Aleksandar Stanković", Worker, "location-3", "16:00-00:00"),
        employee(10, "Teodora Milošević", Worker, "production", "06:00-14:00"),
    ]
}

fn seed_templates() -> Vec<ChecklistTemplate> {
    vec![
        ChecklistTemplate {
            id: "oil-change".to_string(),
            title: "Oil Change".to_string(),
            frequency: Frequency::Weekly,
            tasks: vec![
                task(1, "Drain old oil completely", TaskKind::Checkbox),
                task(2, "Clean fryer basket and interior", TaskKind::Checkbox),
                task(3, "Add fresh oil (liters)", number("L")),
                task(4, "Record oil temperature", number("°C")),
                task(5, "Photo of clean fryer", TaskKind::Photo),
                task(6, "Notes or issues", TaskKind::Text),
            ],
        },
        ChecklistTemplate {
            id: "cleaning".to_string(),
            title: "Daily Cleaning".to_string(),
            frequency: Frequency::Daily,
            tasks: vec![
                task(1, "Sweep and mop floors", TaskKind::Checkbox),
                task(2, "Clean all surfaces", TaskKind::Checkbox),
                task(3, "Empty trash bins", TaskKind::Checkbox),
                task(4, "Clean restrooms", TaskKind::Checkbox),
                task(5, "Photo of cleaned area", TaskKind::Photo),
            ],
        },
        ChecklistTemplate {
            id: "fridge-temps".to_string(),
            title: "Fridge Temperature Check".to_string(),
            frequency: Frequency::Daily,
            tasks: vec![
                task(1, "Walk-in cooler temp (°C)", number("°C")),
                task(2, "Prep fridge temp (°C)", number("°C")),
                task(3, "Freezer temp (°C)", number("°C")),
                task(4, "All temps within range (2-4°C)", TaskKind::Checkbox),
                task(5, "Issues or anomalies", TaskKind::Text),
            ],
        },
        ChecklistTemplate {
            id: "drink-count".to_string(),
            title: "Drink Inventory Count".to_string(),
            frequency: Frequency::Daily,
            tasks: vec![
                task(1, "Coca-Cola cans remaining", number("cans")),
                task(2, "Water bottles remaining", number("bottles")),
                task(3, "Juice boxes remaining", number("boxes")),
                task(4, "Restock needed?", TaskKind::Checkbox),
                task(5, "Notes", TaskKind::Text),
            ],
        },
    ]
}

/// Value recorded for a task that the seed marks as done.
fn seeded_value(kind: &TaskKind, checklist_id: &str, salt: usize) -> Option<String> {
    match kind {
        TaskKind::Checkbox => None,
        TaskKind::Number { .. } => Some(((salt * 7) % 50).to_string()),
        TaskKind::Text => Some("All good".to_string()),
        TaskKind::Photo => Some(format!("{checklist_id}.jpg")),
    }
}

impl DemoStore {
    pub fn seeded(now: NaiveDateTime) -> Self {
        let today = now.date();
        let locations = seed_locations();
        let employees = seed_employees();
        let templates = seed_templates();

        let mut checklists = Vec::new();
        for (e, emp) in employees.iter().enumerate() {
            let location_name = locations
                .iter()
                .find(|l| l.id == emp.location_id)
                .map(|l| l.name.clone())
                .unwrap_or_default();

            for (k, template_id) in DAILY_TEMPLATES.iter().enumerate() {
                let Some(template) = templates.iter().find(|t| t.id == *template_id) else {
                    continue;
                };
                let id = format!("checklist-{}-{}", emp.id, template.id);
                // every fourth checklist starts fully done, the rest partially
                let all_done = (e + k) % 4 == 0;

                let tasks = template
                    .tasks
                    .iter()
                    .enumerate()
                    .map(|(i, t)| {
                        let completed = all_done || (e + k + i) % 3 != 0;
                        Task {
                            id: t.id.clone(),
                            title: t.title.clone(),
                            kind: t.kind.clone(),
                            completed,
                            value: if completed {
                                seeded_value(&t.kind, &id, e + k + i)
                            } else {
                                None
                            },
                            timestamp: completed
                                .then(|| now - Duration::minutes((e * 5 + i * 3 + 1) as i64)),
                        }
                    })
                    .collect();

                let mut checklist = Checklist {
                    id,
                    employee_id: emp.id.clone(),
                    employee_name: emp.name.clone(),
                    location_id: emp.location_id.clone(),
                    location_name: location_name.clone(),
                    template_id: template.id.clone(),
                    title: template.title.clone(),
                    date: today,
                    status: ChecklistStatus::Pending,
                    progress: 0,
                    last_updated: now - Duration::minutes((e * 4 + k + 1) as i64),
                    tasks,
                };
                checklist.recompute();
                checklists.push(checklist);
            }
        }

        let oil = |n: u32, loc: &str, fryer: u32, days_ago: i64, emp: &Employee| {
            let date = today - Duration::days(days_ago);
            OilChange {
                id: format!("oil-{n}"),
                location_id: loc.to_string(),
                fryer,
                date,
                employee_id: emp.id.clone(),
                employee_name: emp.name.clone(),
                next_due: date + Duration::days(7),
            }
        };
        let oil_changes = vec![
            oil(1, "location-1", 1, 4, &employees[0]),
            oil(2, "location-1", 2, 3, &employees[2]),
            oil(3, "location-2", 1, 6, &employees[3]),
            oil(4, "location-3", 1, 9, &employees[6]),
        ];

        let mut store = Self {
            locations,
            employees,
            templates,
            checklists,
            oil_changes,
            events: Vec::new(),
            notifications: Vec::new(),
            next_id: 1,
        };

        let seeds = [
            (
                EventKind::Cleaning,
                "Deep Kitchen Cleaning",
                10,
                "08:00",
                "location-1",
                "Complete deep clean of kitchen area including walls, ceiling, and equipment",
            ),
            (
                EventKind::Meeting,
                "Monthly Staff Meeting",
                16,
                "10:00",
                "all",
                "Review performance metrics and discuss upcoming promotions",
            ),
            (
                EventKind::Inspection,
                "Health & Safety Inspection",
                21,
                "14:00",
                "location-2",
                "Annual health inspection by city authorities",
            ),
        ];
        for (kind, title, in_days, time, loc, description) in seeds {
            let event = NewEvent {
                kind,
                title: title.to_string(),
                date: today + Duration::days(in_days),
                time: NaiveTime::parse_from_str(time, "%H:%M").unwrap_or(NaiveTime::MIN),
                location_id: loc.to_string(),
                description: description.to_string(),
            };
            // seeds reference known locations, creation cannot fail
            let _ = crate::dashboard::events::create_event(&mut store, event);
        }

        let summary = crate::dashboard::notifications::end_of_day_summary(&store);
        let seeds = [
            (
                NotificationKind::ShiftReminder,
                "⏰ Shift Ending Soon",
                "You have 1 hour left in your shift. Please complete remaining checklists.".to_string(),
                "emp-1",
                "Marko Petrović",
                Duration::minutes(30),
                false,
            ),
            (
                NotificationKind::OilChange,
                "🔥 Oil Change Due Tomorrow",
                "You are scheduled for oil change at Knez Mihailova, Fryer 1 tomorrow at 08:00.".to_string(),
                "emp-1",
                "Marko Petrović",
                Duration::days(1),
                true,
            ),
            (
                NotificationKind::EventReminder,
                "📅 Event in 7 Days",
                "Deep Kitchen Cleaning scheduled at Knez Mihailova.".to_string(),
                "all-location-1",
                "All Staff - Knez Mihailova",
                Duration::days(2),
                true,
            ),
            (
                NotificationKind::DailySummary,
                "📊 End of Day Summary",
                summary,
                "manager",
                "General Manager",
                Duration::hours(12),
                false,
            ),
        ];
        for (kind, title, message, recipient, recipient_name, age, read) in seeds {
            let id = store.next_id("notif");
            store.notifications.push(Notification {
                id,
                kind,
                title: title.to_string(),
                message,
                recipient: recipient.to_string(),
                recipient_name: recipient_name.to_string(),
                timestamp: now - age,
                read,
            });
        }

        store
    }

    /// Sequential id such as `event-4` or `notif-7`.
    pub fn next_id(&mut self, prefix: &str) -> String {
        let id = format!("{prefix}-{}", self.next_id);
        self.next_id += 1;
        id
    }

    pub fn location_name(&self, id: &str) -> Option<&str> {
        self.locations
            .iter()
            .find(|l| l.id == id)
            .map(|l| l.name.as_str())
    }

    pub fn employee(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    pub fn checklists_for(&self, employee_id: &str) -> Vec<&Checklist> {
        self.checklists
            .iter()
            .filter(|c| c.employee_id == employee_id)
            .collect()
    }

    pub fn checklist_mut(&mut self, id: &str) -> Option<&mut Checklist> {
        self.checklists.iter_mut().find(|c| c.id == id)
    }
}

/// Input for a new scheduled event.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub kind: EventKind,
    pub title: String,
    pub date: chrono::NaiveDate,
    pub time: NaiveTime,
    pub location_id: String,
    pub description: String,
}
