use pixel_ecs::{ComponentId, Coordinator, Error, MAX_COMPONENTS};

macro_rules! register_all {
    ($coordinator:expr, $($name:ident),+ $(,)?) => {{
        let mut ids = Vec::new();
        $(
            struct $name;
            ids.push($coordinator.register_component::<$name>());
        )+
        ids
    }};
}

#[test]
fn test_too_many_component_types() {
    let mut coordinator = Coordinator::new();
    let ids = register_all!(
        coordinator, C00, C01, C02, C03, C04, C05, C06, C07, C08, C09, C10, C11, C12, C13, C14,
        C15, C16, C17, C18, C19, C20, C21, C22, C23, C24, C25, C26, C27, C28, C29, C30, C31, C32,
    );
    assert_eq!(ids.len(), MAX_COMPONENTS + 1);

    let (accepted, rejected) = ids.split_at(MAX_COMPONENTS);
    for (index, id) in accepted.iter().enumerate() {
        assert_eq!(id.as_ref().map(|id| id.index()), Ok(index));
    }
    assert!(matches!(
        rejected[0],
        Err(Error::ComponentLimit { max: MAX_COMPONENTS, .. })
    ));

    struct Late;
    assert!(coordinator.register_component::<Late>().is_err());

    // Queries on unseen types must neither register them nor panic.
    struct Unseen;
    let entity = coordinator.create();
    assert!(!coordinator.has_component::<Unseen>(entity));
    assert!(coordinator.get_component::<Unseen>(entity).is_err());
    assert!(coordinator.get_component_mut::<Unseen>(entity).is_err());
    assert!(coordinator.remove_component::<Unseen>(entity).is_none());
    assert!(coordinator.pool::<Unseen>().is_none());
    assert_eq!(ComponentId::get::<Unseen>(), None);
}
