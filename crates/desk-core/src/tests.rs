#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use async_trait::async_trait;
    use futures::executor::block_on;

    use crate::board::*;
    use crate::chat::*;
    use crate::event_bus::EventBus;
    use crate::ports::*;
    use desk_types::DeskError;
    use desk_types::appointment::{Appointment, AppointmentStatus};
    use desk_types::chat::*;
    use desk_types::config::demo_appointments;
    use desk_types::event::{DeskEvent, NoticeLevel};
    use desk_types::ticket::{Ticket, TicketList};

    fn ticket(id: &str, is_open: bool) -> Ticket {
        Ticket {
            id: id.to_string(),
            issue: format!("Issue {}", id),
            time: "2024-02-22T10:00:00Z".to_string(),
            name: "Tech".to_string(),
            is_open,
        }
    }

    fn board_with(bus: &EventBus) -> AppointmentBoard {
        AppointmentBoard::new(demo_appointments(), bus.clone())
    }

    fn loaded_board(bus: &EventBus, tickets: Vec<Ticket>) -> AppointmentBoard {
        let mut board = board_with(bus);
        let token = board.begin_load();
        board.finish_load(token, Ok(TicketList::new(tickets)));
        board
    }

    fn ids(appts: &[Appointment]) -> Vec<&str> {
        appts.iter().map(|a| a.id.as_str()).collect()
    }

    // ─── EventBus Tests ──────────────────────────────────────

    #[test]
    fn test_event_bus_new_is_empty() {
        let bus = EventBus::new();
        assert!(!bus.has_pending());
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn test_event_bus_drains_in_publish_order() {
        let bus = EventBus::new();
        bus.request_refresh();
        bus.notify(NoticeLevel::Success, "ok");
        assert!(bus.has_pending());

        let events = bus.drain();
        assert_eq!(
            events,
            vec![
                DeskEvent::RefreshRequested,
                DeskEvent::notice(NoticeLevel::Success, "ok"),
            ]
        );
        assert!(!bus.has_pending());
    }

    #[test]
    fn test_event_bus_collapses_refresh_until_drained() {
        let bus = EventBus::new();
        bus.request_refresh();
        bus.request_refresh();
        bus.notify(NoticeLevel::Error, "bad");
        bus.request_refresh();
        assert_eq!(bus.drain().len(), 2);

        bus.request_refresh();
        assert_eq!(bus.drain(), vec![DeskEvent::RefreshRequested]);
    }

    #[test]
    fn test_event_bus_notices_are_not_collapsed() {
        let bus = EventBus::new();
        bus.notify(NoticeLevel::Error, "first");
        bus.notify(NoticeLevel::Error, "first");
        assert_eq!(bus.drain().len(), 2);
    }

    #[test]
    fn test_event_bus_clone_shares_state() {
        let bus1 = EventBus::new();
        let bus2 = bus1.clone();
        bus1.request_refresh();
        assert!(bus2.has_pending());
        assert_eq!(bus2.drain().len(), 1);
        assert!(!bus1.has_pending());
    }

    // ─── AppointmentBoard Tests ──────────────────────────────

    #[test]
    fn test_board_initial_state() {
        let bus = EventBus::new();
        let board = board_with(&bus);
        assert!(board.is_loading());
        assert!(board.appointments().is_empty());
    }

    #[test]
    fn test_board_load_maps_tickets_in_order() {
        let bus = EventBus::new();
        let mut board = board_with(&bus);
        let token = board.begin_load();
        let outcome = board.finish_load(
            token,
            Ok(TicketList::new(vec![ticket("b", false), ticket("a", true)])),
        );

        assert_eq!(outcome, LoadOutcome::Loaded(2));
        assert!(!board.is_loading());
        assert_eq!(ids(board.appointments()), vec!["b", "a"]);
        assert_eq!(board.appointments()[0].status, AppointmentStatus::Completed);
        assert_eq!(board.appointments()[1].status, AppointmentStatus::InProgress);
    }

    #[test]
    fn test_board_empty_list_uses_fallback() {
        let bus = EventBus::new();
        let mut board = board_with(&bus);
        let token = board.begin_load();
        let outcome = board.finish_load(token, Ok(TicketList::new(vec![])));

        assert_eq!(outcome, LoadOutcome::Fallback);
        assert_eq!(board.appointments(), demo_appointments().as_slice());
        assert!(!board.is_loading());
    }

    #[test]
    fn test_board_missing_list_uses_fallback() {
        let bus = EventBus::new();
        let mut board = board_with(&bus);
        let token = board.begin_load();
        let list: TicketList = serde_json::from_str("{}").unwrap();
        assert_eq!(board.finish_load(token, Ok(list)), LoadOutcome::Fallback);
        assert_eq!(board.appointments().len(), 2);
    }

    #[test]
    fn test_board_malformed_response_uses_fallback() {
        let bus = EventBus::new();
        let mut board = board_with(&bus);
        let token = board.begin_load();
        let decoded = serde_json::from_str::<TicketList>(r#"{"response":42}"#)
            .map_err(DeskError::from);
        assert_eq!(board.finish_load(token, decoded), LoadOutcome::Fallback);
        assert_eq!(ids(board.appointments()), vec!["mock-1", "mock-2"]);
    }

    #[test]
    fn test_board_sparse_record_keeps_real_list() {
        let bus = EventBus::new();
        let mut board = board_with(&bus);
        let token = board.begin_load();
        let body = r#"{"response":[
            {"_id":"a","issue":"AC","time":"2024-02-22T10:00:00Z","name":"Sam","isOpen":true},
            {"_id":"b","issue":"X","time":null,"name":"Ann","isOpen":false}
        ]}"#;
        let decoded = serde_json::from_str::<TicketList>(body).map_err(DeskError::from);

        assert_eq!(board.finish_load(token, decoded), LoadOutcome::Loaded(2));
        assert_eq!(ids(board.appointments()), vec!["a", "b"]);
        assert_eq!(board.appointments()[1].technician, "Ann");
        assert_eq!(board.appointments()[1].status, AppointmentStatus::Completed);
    }

    #[test]
    fn test_board_network_error_uses_fallback_silently() {
        let bus = EventBus::new();
        let mut board = board_with(&bus);
        let token = board.begin_load();
        let outcome = board.finish_load(token, Err(DeskError::Network("offline".to_string())));

        assert_eq!(outcome, LoadOutcome::Fallback);
        assert_eq!(board.appointments().len(), 2);
        assert!(!board.is_loading());
        // Read failures never reach the user
        assert!(!bus.has_pending());
    }

    #[test]
    fn test_board_reload_replaces_list() {
        let bus = EventBus::new();
        let mut board = loaded_board(&bus, vec![ticket("a", true), ticket("b", true)]);
        let token = board.begin_load();
        board.finish_load(token, Ok(TicketList::new(vec![ticket("c", false)])));
        assert_eq!(ids(board.appointments()), vec!["c"]);
    }

    #[test]
    fn test_board_stale_load_is_dropped() {
        let bus = EventBus::new();
        let mut board = board_with(&bus);
        let first = board.begin_load();
        let second = board.begin_load();

        let outcome = board.finish_load(second, Ok(TicketList::new(vec![ticket("new", true)])));
        assert_eq!(outcome, LoadOutcome::Loaded(1));

        let outcome = board.finish_load(first, Ok(TicketList::new(vec![ticket("old", true)])));
        assert_eq!(outcome, LoadOutcome::Stale);
        assert_eq!(ids(board.appointments()), vec!["new"]);
    }

    #[test]
    fn test_board_stale_load_keeps_spinner_until_latest() {
        let bus = EventBus::new();
        let mut board = board_with(&bus);
        let first = board.begin_load();
        let second = board.begin_load();

        board.finish_load(first, Err(DeskError::Network("slow".to_string())));
        assert!(board.is_loading());
        assert!(board.appointments().is_empty());

        board.finish_load(second, Ok(TicketList::new(vec![ticket("x", false)])));
        assert!(!board.is_loading());
    }

    #[test]
    fn test_board_groups_partition() {
        let bus = EventBus::new();
        let board = loaded_board(
            &bus,
            vec![ticket("1", true), ticket("2", false), ticket("3", true), ticket("4", false)],
        );
        let groups = board.groups();
        let in_progress: Vec<&str> = groups.in_progress.iter().map(|a| a.id.as_str()).collect();
        let completed: Vec<&str> = groups.completed.iter().map(|a| a.id.as_str()).collect();

        assert_eq!(in_progress, vec!["1", "3"]);
        assert_eq!(completed, vec!["2", "4"]);
        assert!(in_progress.iter().all(|id| !completed.contains(id)));
    }

    #[test]
    fn test_board_groups_omit_reserved_statuses() {
        let bus = EventBus::new();
        let mut fallback = demo_appointments();
        fallback[0].status = AppointmentStatus::Scheduled;
        fallback[1].status = AppointmentStatus::Cancelled;
        let mut board = AppointmentBoard::new(fallback, bus);
        let token = board.begin_load();
        board.finish_load(token, Ok(TicketList::default()));

        assert_eq!(board.appointments().len(), 2);
        let groups = board.groups();
        assert!(groups.in_progress.is_empty());
        assert!(groups.completed.is_empty());
    }

    #[test]
    fn test_board_cancel_success_removes_only_that_id() {
        let bus = EventBus::new();
        let mut board = loaded_board(&bus, vec![ticket("a", true), ticket("b", true), ticket("c", false)]);

        assert!(board.finish_cancel("b", Ok(())));
        assert_eq!(ids(board.appointments()), vec!["a", "c"]);

        let events = bus.drain();
        assert_eq!(events, vec![DeskEvent::notice(NoticeLevel::Success, CANCEL_SUCCESS)]);
    }

    #[test]
    fn test_board_cancel_failure_leaves_list() {
        let bus = EventBus::new();
        let mut board = loaded_board(&bus, vec![ticket("a", true), ticket("b", true)]);

        let removed = board.finish_cancel("a", Err(DeskError::Http {
            status: 500,
            message: "Internal Server Error".to_string(),
        }));
        assert!(!removed);
        assert_eq!(ids(board.appointments()), vec!["a", "b"]);

        let events = bus.drain();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            &events[0],
            DeskEvent::Notice { level: NoticeLevel::Error, message } if message == CANCEL_FAILURE
        ));
    }

    // ─── Mock Ports ──────────────────────────────────────────

    /// Mock ticket backend with a scripted list result and delete outcome
    struct MockTickets {
        list: desk_types::Result<TicketList>,
        delete_ok: bool,
        list_calls: Cell<usize>,
        deleted: RefCell<Vec<String>>,
    }

    impl MockTickets {
        fn new(list: desk_types::Result<TicketList>, delete_ok: bool) -> Self {
            Self {
                list,
                delete_ok,
                list_calls: Cell::new(0),
                deleted: RefCell::new(Vec::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl TicketPort for MockTickets {
        async fn list_tickets(&self) -> desk_types::Result<TicketList> {
            self.list_calls.set(self.list_calls.get() + 1);
            self.list.clone()
        }

        async fn delete_ticket(&self, id: &str) -> desk_types::Result<()> {
            self.deleted.borrow_mut().push(id.to_string());
            if self.delete_ok {
                Ok(())
            } else {
                Err(DeskError::Http { status: 404, message: "Not Found".to_string() })
            }
        }
    }

    /// Mock chat backend that records requests and returns a scripted reply
    struct MockChat {
        reply: desk_types::Result<ChatReply>,
        requests: RefCell<Vec<ChatRequest>>,
    }

    impl MockChat {
        fn replying(response: &str, thread_id: &str, ticket_created: bool) -> Self {
            Self {
                reply: Ok(ChatReply {
                    response: Some(response.to_string()),
                    thread_id: Some(thread_id.to_string()),
                    ticket_created: Some(ticket_created),
                }),
                requests: RefCell::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                reply: Err(DeskError::Network("connection reset".to_string())),
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl ChatPort for MockChat {
        async fn send_chat(&self, req: &ChatRequest) -> desk_types::Result<ChatReply> {
            self.requests.borrow_mut().push(req.clone());
            self.reply.clone()
        }
    }

    // ─── Board Driver Tests ──────────────────────────────────

    #[test]
    fn test_load_appointments_driver() {
        let bus = EventBus::new();
        let board = RefCell::new(board_with(&bus));
        let port = MockTickets::new(Ok(TicketList::new(vec![ticket("t1", true)])), true);

        let outcome = block_on(load_appointments(&board, &port));
        assert_eq!(outcome, LoadOutcome::Loaded(1));
        assert_eq!(port.list_calls.get(), 1);
        assert_eq!(ids(board.borrow().appointments()), vec!["t1"]);
    }

    #[test]
    fn test_cancel_appointment_driver_success() {
        let bus = EventBus::new();
        let board = RefCell::new(loaded_board(&bus, vec![ticket("t1", true), ticket("t2", true)]));
        let port = MockTickets::new(Ok(TicketList::default()), true);

        assert!(block_on(cancel_appointment(&board, &port, "t1")));
        assert_eq!(*port.deleted.borrow(), vec!["t1".to_string()]);
        assert_eq!(ids(board.borrow().appointments()), vec!["t2"]);
    }

    #[test]
    fn test_cancel_appointment_driver_failure() {
        let bus = EventBus::new();
        let board = RefCell::new(loaded_board(&bus, vec![ticket("t1", true)]));
        let port = MockTickets::new(Ok(TicketList::default()), false);

        assert!(!block_on(cancel_appointment(&board, &port, "t1")));
        assert_eq!(ids(board.borrow().appointments()), vec!["t1"]);
        assert_eq!(bus.drain(), vec![DeskEvent::notice(NoticeLevel::Error, CANCEL_FAILURE)]);
    }

    // ─── format_reply Tests ──────────────────────────────────

    #[test]
    fn test_format_reply_strips_markers() {
        assert_eq!(
            format_reply("**FINAL ANSWER:** Your ticket is booked."),
            "Your ticket is booked."
        );
    }

    #[test]
    fn test_format_reply_plain_text_untouched() {
        assert_eq!(format_reply("  What time suits you?\n"), "What time suits you?");
    }

    #[test]
    fn test_format_reply_keeps_inner_newlines() {
        assert_eq!(format_reply("**Slots:**\n- 9am\n- 2pm"), "Slots:\n- 9am\n- 2pm");
    }

    #[test]
    fn test_is_terminal() {
        assert!(is_terminal("**FINAL ANSWER:** done"));
        assert!(is_terminal("FINAL ANSWER: done"));
        assert!(!is_terminal("final answer: done"));
        assert!(!is_terminal("Which day works?"));
    }

    // ─── ChatSession Tests ───────────────────────────────────

    #[test]
    fn test_session_initial_state() {
        let session = ChatSession::new(EventBus::new());
        assert!(session.messages().is_empty());
        assert!(session.thread_id().is_none());
        assert!(!session.is_busy());
    }

    #[test]
    fn test_begin_send_blank_is_noop() {
        let mut session = ChatSession::new(EventBus::new());
        assert!(session.begin_send("").is_none());
        assert!(session.begin_send("   \n\t").is_none());
        assert!(session.messages().is_empty());
        assert!(!session.is_busy());
    }

    #[test]
    fn test_begin_send_appends_optimistically() {
        let mut session = ChatSession::new(EventBus::new());
        let req = session.begin_send("Need a plumber").unwrap();

        assert_eq!(req.message, "Need a plumber");
        assert_eq!(req.thread_id, "");
        assert!(session.is_busy());
        assert_eq!(session.messages(), &[ChatMessage::you("Need a plumber")]);
    }

    #[test]
    fn test_begin_send_while_busy_is_rejected() {
        let mut session = ChatSession::new(EventBus::new());
        assert!(session.begin_send("first").is_some());
        assert!(session.begin_send("second").is_none());
        assert_eq!(session.messages().len(), 1);
    }

    #[test]
    fn test_send_blank_makes_no_network_call() {
        let session = RefCell::new(ChatSession::new(EventBus::new()));
        let port = MockChat::replying("hi", "th_1", false);

        assert!(!block_on(send_message(&session, &port, "  ")));
        assert!(port.requests.borrow().is_empty());
        assert!(session.borrow().messages().is_empty());
    }

    #[test]
    fn test_send_adopts_thread_id() {
        let bus = EventBus::new();
        let session = RefCell::new(ChatSession::new(bus.clone()));
        let port = MockChat::replying("**Sure.** Which day?", "th_42", false);

        assert!(block_on(send_message(&session, &port, "Book AC repair")));

        let s = session.borrow();
        assert_eq!(s.thread_id(), Some("th_42"));
        assert!(!s.is_busy());
        assert_eq!(
            s.messages(),
            &[ChatMessage::you("Book AC repair"), ChatMessage::agent("Sure. Which day?")]
        );
        assert!(!bus.has_pending());
    }

    #[test]
    fn test_second_send_carries_thread_id() {
        let session = RefCell::new(ChatSession::new(EventBus::new()));
        let port = MockChat::replying("Which day?", "th_7", false);

        block_on(send_message(&session, &port, "hello"));
        block_on(send_message(&session, &port, "Friday"));

        let requests = port.requests.borrow();
        assert_eq!(requests[0].thread_id, "");
        assert_eq!(requests[1].thread_id, "th_7");
        assert_eq!(requests[1].message, "Friday");
    }

    #[test]
    fn test_terminal_marker_clears_thread_id() {
        let session = RefCell::new(ChatSession::new(EventBus::new()));

        block_on(send_message(&session, &MockChat::replying("Which day?", "th_1", false), "hi"));
        assert_eq!(session.borrow().thread_id(), Some("th_1"));

        let done = MockChat::replying("**FINAL ANSWER:** Your ticket is booked.", "th_1", true);
        block_on(send_message(&session, &done, "Friday 10am"));

        let s = session.borrow();
        assert!(s.thread_id().is_none());
        assert_eq!(s.messages().last().unwrap().text, "Your ticket is booked.");
    }

    #[test]
    fn test_ticket_created_requests_refresh_once() {
        let bus = EventBus::new();
        let session = RefCell::new(ChatSession::new(bus.clone()));
        let port = MockChat::replying("**FINAL ANSWER:** Booked.", "th_1", true);

        block_on(send_message(&session, &port, "book it"));
        assert_eq!(bus.drain(), vec![DeskEvent::RefreshRequested]);
    }

    #[test]
    fn test_ticket_not_created_no_refresh() {
        let bus = EventBus::new();
        let session = RefCell::new(ChatSession::new(bus.clone()));
        block_on(send_message(&session, &MockChat::replying("ok", "th_1", false), "hi"));
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn test_reply_without_response_field() {
        let bus = EventBus::new();
        let mut session = ChatSession::new(bus);
        session.begin_send("hi");
        session.finish_send(Ok(ChatReply {
            response: None,
            thread_id: Some("th_3".to_string()),
            ticket_created: None,
        }));

        assert_eq!(session.messages()[1], ChatMessage::agent(EMPTY_REPLY));
        assert_eq!(session.thread_id(), Some("th_3"));
    }

    #[test]
    fn test_reply_without_thread_id_clears_it() {
        let mut session = ChatSession::new(EventBus::new());
        session.begin_send("hi");
        session.finish_send(Ok(ChatReply {
            response: Some("a".to_string()),
            thread_id: Some("th_1".to_string()),
            ticket_created: None,
        }));
        session.begin_send("again");
        session.finish_send(Ok(ChatReply {
            response: Some("b".to_string()),
            thread_id: Some(String::new()),
            ticket_created: None,
        }));
        assert!(session.thread_id().is_none());
    }

    #[test]
    fn test_network_failure_appends_single_apology() {
        let session = RefCell::new(ChatSession::new(EventBus::new()));
        block_on(send_message(&session, &MockChat::replying("Which day?", "th_5", false), "hi"));

        let before = session.borrow().messages().len();
        assert!(block_on(send_message(&session, &MockChat::failing(), "Friday")));

        let s = session.borrow();
        assert_eq!(s.messages().len(), before + 2);
        assert_eq!(s.messages().last().unwrap(), &ChatMessage::agent(APOLOGY));
        assert_eq!(
            s.messages().iter().filter(|m| m.text == APOLOGY).count(),
            1
        );
        assert_eq!(s.thread_id(), Some("th_5"));
        assert!(!s.is_busy());
    }

    #[test]
    fn test_failure_allows_next_send() {
        let session = RefCell::new(ChatSession::new(EventBus::new()));
        block_on(send_message(&session, &MockChat::failing(), "hi"));
        assert!(block_on(send_message(&session, &MockChat::replying("ok", "t", false), "retry")));
        assert_eq!(session.borrow().messages().len(), 4);
    }
}
