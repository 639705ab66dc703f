use oxide_reduce::{case_path, from_fn, merge, BoxReducer, Effect, Never, Reducer, TestStore};

#[derive(Clone, Debug, PartialEq)]
enum Action {
    Refresh,
    Loaded(&'static str),
    Failed(String),
}

#[derive(Clone, Debug, Default, PartialEq)]
struct Dashboard {
    loaded: Vec<&'static str>,
    failures: Vec<String>,
}

#[test]
fn given_merged_effects_when_one_fails_should_recover_it_without_losing_siblings() {
    let profile = from_fn(|_: &mut Dashboard, action: Action, _: &()| -> Effect<Action, String> {
        match action {
            Action::Refresh => Effect::single(async { Ok(Action::Loaded("profile")) }),
            _ => Effect::none(),
        }
    });
    let feed = from_fn(|_: &mut Dashboard, action: Action, _: &()| -> Effect<Action, String> {
        match action {
            Action::Refresh => Effect::single(async { Err("timeout".to_string()) }),
            _ => Effect::none(),
        }
    });
    let record = from_fn(|state: &mut Dashboard, action: Action, _: &()| -> Effect<Action, String> {
        match action {
            Action::Loaded(section) => state.loaded.push(section),
            Action::Failed(failure) => state.failures.push(failure),
            Action::Refresh => {}
        }
        Effect::none()
    });

    let reducer = profile
        .combine(feed)
        .combine(record)
        .catch_failures(|failure: String| Effect::just(Action::Failed(failure)));
    let mut store = TestStore::new(Dashboard::default(), reducer, ());

    store.send(Action::Refresh);

    assert_eq!(store.received().len(), 2);
    assert!(store.received().contains(&Action::Loaded("profile")));
    assert!(store.received().contains(&Action::Failed("timeout".to_string())));
    assert_eq!(store.state().loaded, vec!["profile"]);
    assert_eq!(store.state().failures, vec!["timeout".to_string()]);
}

#[derive(Clone, Debug, PartialEq)]
enum FormAction {
    Title(String),
    Clear,
}

#[derive(Clone, Debug, PartialEq)]
enum PageAction {
    Form(FormAction),
    Reset,
}

#[derive(Clone, Debug, Default, PartialEq)]
struct Page {
    title: String,
    edits: u32,
}

type FormEffect = Effect<FormAction, Never>;
type PageEffect = Effect<PageAction, Never>;

#[test]
fn given_pulled_back_children_should_only_see_their_own_actions() {
    let form = from_fn(|title: &mut String, action: FormAction, _: &()| -> FormEffect {
        match action {
            FormAction::Title(text) => *title = text,
            FormAction::Clear => title.clear(),
        }
        Effect::none()
    });
    let counter = from_fn(|page: &mut Page, action: PageAction, _: &()| -> PageEffect {
        match action {
            PageAction::Form(_) => page.edits += 1,
            PageAction::Reset => *page = Page::default(),
        }
        Effect::none()
    });

    let reducer = counter.combine(form.pullback(
        |page: &mut Page| &mut page.title,
        case_path!(PageAction::Form),
        |_: &()| (),
    ));
    let mut store = TestStore::new(Page::default(), reducer, ());

    store.send(PageAction::Form(FormAction::Title("Draft".to_string())));
    assert_eq!(store.state().title, "Draft");
    assert_eq!(store.state().edits, 1);

    store.send(PageAction::Reset);
    assert_eq!(store.state(), &Page::default());
}

#[test]
fn given_overlapping_writes_when_merged_should_keep_the_last_reducers_write() {
    let writer = |label: &'static str| -> BoxReducer<Vec<&'static str>, (), ()> {
        Box::new(from_fn(move |log: &mut Vec<&'static str>, _: (), _: &()| -> Effect<(), Never> {
            log.clear();
            log.push(label);
            Effect::none()
        }))
    };

    let mut store = TestStore::new(Vec::new(), merge([writer("first"), writer("second")]), ());
    store.send(());

    assert_eq!(store.state(), &vec!["second"]);
}

#[test]
fn given_child_effects_should_embed_their_actions_into_the_parent() {
    let form = from_fn(|title: &mut String, action: FormAction, _: &()| -> FormEffect {
        match action {
            FormAction::Title(_) => Effect::just(FormAction::Clear),
            FormAction::Clear => {
                title.clear();
                Effect::none()
            }
        }
    });
    let reducer = form.pullback(
        |page: &mut Page| &mut page.title,
        case_path!(PageAction::Form),
        |_: &()| (),
    );
    let mut store = TestStore::new(
        Page {
            title: "Old".to_string(),
            edits: 0,
        },
        reducer,
        (),
    );

    store.send(PageAction::Form(FormAction::Title("New".to_string())));

    assert_eq!(store.received(), &[PageAction::Form(FormAction::Clear)]);
    assert_eq!(store.state().title, "");
}
