use anyhow::Result;
use sea_orm::{EntityTrait, ModelTrait, QueryOrder};

use super::setup_test_db;
use crate::{course, instructor, student, student_course};

#[tokio::test]
async fn test_many_to_many_both_directions() -> Result<()> {
    let db = setup_test_db().await?;

    let john = student::create(&db, "John").await?;
    let julian = student::create(&db, "Julian").await?;
    let js = course::create(&db, "JavaScript", None).await?;
    let node = course::create(&db, "Node.js", None).await?;

    student_course::link(&db, john.id, js.id).await?;
    student_course::link(&db, john.id, node.id).await?;
    student_course::link(&db, julian.id, js.id).await?;

    let johns = john
        .find_related(course::Entity)
        .order_by_asc(course::Column::Id)
        .all(&db)
        .await?;
    assert_eq!(johns.iter().map(|c| c.id).collect::<Vec<_>>(), vec![js.id, node.id]);

    let in_js = js
        .find_related(student::Entity)
        .order_by_asc(student::Column::Id)
        .all(&db)
        .await?;
    assert_eq!(in_js.iter().map(|s| s.id).collect::<Vec<_>>(), vec![john.id, julian.id]);

    assert!(node.find_related(student::Entity).all(&db).await?.len() == 1);
    Ok(())
}

#[tokio::test]
async fn test_instructor_courses_and_back_reference() -> Result<()> {
    let db = setup_test_db().await?;

    let sally = instructor::create(&db, "Sally").await?;
    let c1 = course::create(&db, "Data Science", Some(sally.id)).await?;
    let c2 = course::create(&db, "Java Back End", Some(sally.id)).await?;
    course::create(&db, "Unassigned", None).await?;

    let taught = sally.find_related(course::Entity).order_by_asc(course::Column::Id).all(&db).await?;
    assert_eq!(taught.iter().map(|c| c.id).collect::<Vec<_>>(), vec![c1.id, c2.id]);

    let owner = c1.find_related(instructor::Entity).one(&db).await?;
    assert_eq!(owner.map(|i| i.id), Some(sally.id));
    Ok(())
}

#[tokio::test]
async fn test_deleting_student_cascades_links() -> Result<()> {
    let db = setup_test_db().await?;

    let s = student::create(&db, "Mary").await?;
    let c = course::create(&db, "Mobile IOS", None).await?;
    student_course::link(&db, s.id, c.id).await?;

    student_course::unlink_student(&db, s.id).await?;
    student::Entity::delete_by_id(s.id).exec(&db).await?;

    assert!(c.find_related(student::Entity).all(&db).await?.is_empty());
    assert!(course::Entity::find_by_id(c.id).one(&db).await?.is_some());
    Ok(())
}
