//! First-login bootstrapping tests over in-memory storage.

use super::helpers::{Marketplace, marketplace};
use eyre::ensure;
use rstest::rstest;
use skillconnect::account::AccountId;
use skillconnect::profile::{
    domain::{AccountMetadata, SkillConnectId},
    services::BootstrapRequest,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn student_first_login_then_return(marketplace: Marketplace) -> eyre::Result<()> {
    let account = AccountId::new();
    let request = BootstrapRequest::new(account.to_string(), "student").with_metadata(
        AccountMetadata {
            full_name: Some("Kemi Adeyemi".to_owned()),
            ..AccountMetadata::default()
        },
    );

    let first = marketplace.profiles.bootstrap_on_login(request.clone()).await?;
    let second = marketplace.profiles.bootstrap_on_login(request.clone()).await?;
    marketplace.profiles.complete_onboarding(account).await?;
    let third = marketplace.profiles.bootstrap_on_login(request).await?;

    let expected = SkillConnectId::from_account(account);
    ensure!(first.redirect == "/onboarding/student");
    ensure!(first.skillconnect_id.as_ref() == Some(&expected));
    ensure!(second.redirect == "/onboarding/student");
    ensure!(third.redirect == "/dashboard/student");
    ensure!(third.skillconnect_id == Some(expected));
    ensure!(marketplace.profiles.profile_complete(account).await? == Some(true));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn one_account_may_hold_both_profile_kinds(marketplace: Marketplace) -> eyre::Result<()> {
    let account = AccountId::new();

    marketplace
        .profiles
        .bootstrap_on_login(BootstrapRequest::new(account.to_string(), "student"))
        .await?;
    marketplace
        .profiles
        .bootstrap_on_login(BootstrapRequest::new(
            account.to_string(),
            "organization_user",
        ))
        .await?;

    let id = SkillConnectId::from_account(account);
    let matches = marketplace
        .profiles
        .find_by_skillconnect_id(id.as_str())
        .await?;
    ensure!(matches.len() == 2);
    Ok(())
}
