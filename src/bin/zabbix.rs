use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use zabbix_rs::dto::{GetParameters, HostGetRequest, HostgroupGetRequest, SelectQuery};
use zabbix_rs::retry::RetryPolicy;
use zabbix_rs::{Config, Session, ZabbixError};

#[derive(Parser)]
#[command(name = "zabbix")]
#[command(about = "Zabbix API command line client", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the server API version
    Version,
    /// List hosts, optionally restricted to host groups
    Hosts {
        #[arg(short, long)]
        group_id: Vec<String>,
    },
    /// List host groups
    Hostgroups,
    /// List items of the given hosts
    Items {
        #[arg(required = true)]
        host_ids: Vec<String>,
    },
    /// List interfaces of the given hosts
    Interfaces {
        #[arg(required = true)]
        host_ids: Vec<String>,
    },
    /// Create a host group
    CreateHostgroup { name: String },
    /// Delete items by id
    DeleteItems {
        #[arg(required = true)]
        item_ids: Vec<String>,
    },
    /// End the session and remove the cached token
    Logout,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let mut config = Config::from_file(&cli.config)?;
    if let Ok(password) = std::env::var("ZABBIX_PASSWORD") {
        config.zabbix.password = password;
    }

    let session = Session::new(&config.zabbix)?;
    let retry = RetryPolicy::default();

    match cli.command {
        Commands::Version => {
            let version = retry.retry(|| session.api_version()).await?;
            println!("{version}");
        }
        Commands::Hosts { group_id } => {
            let request = HostGetRequest {
                common: GetParameters {
                    output: SelectQuery::fields(["hostid", "host", "name", "status"]),
                    ..Default::default()
                },
                group_ids: group_id,
                select_groups: SelectQuery::fields(["name"]),
                ..Default::default()
            };
            match retry.retry(|| session.get_hosts(&request)).await {
                Ok(hosts) => {
                    println!(
                        "{:<10} {:<30} {:<10} {}",
                        "ID", "Host", "Monitored", "Groups"
                    );
                    println!("{}", "-".repeat(70));
                    for host in hosts {
                        let groups: Vec<&str> =
                            host.groups.iter().map(|g| g.name.as_str()).collect();
                        println!(
                            "{:<10} {:<30} {:<10} {}",
                            host.host_id,
                            host.host,
                            host.is_monitored(),
                            groups.join(", ")
                        );
                    }
                }
                Err(ZabbixError::NotFound { .. }) => println!("No hosts found"),
                Err(e) => return Err(e.into()),
            }
        }
        Commands::Hostgroups => {
            let request = HostgroupGetRequest {
                common: GetParameters {
                    output: SelectQuery::Extend,
                    ..Default::default()
                },
                ..Default::default()
            };
            match retry.retry(|| session.get_hostgroups(&request)).await {
                Ok(groups) => {
                    for group in groups {
                        println!("{:<10} {}", group.group_id, group.name);
                    }
                }
                Err(ZabbixError::NotFound { .. }) => println!("No host groups found"),
                Err(e) => return Err(e.into()),
            }
        }
        Commands::Items { host_ids } => {
            let lookup = || session.get_items_by_host_ids(host_ids.clone());
            match retry.retry(lookup).await {
                Ok(items) => {
                    println!("{:<10} {:<40} {:<30} {}", "ID", "Key", "Name", "Last value");
                    println!("{}", "-".repeat(100));
                    for item in items {
                        println!(
                            "{:<10} {:<40} {:<30} {}",
                            item.item_id, item.key_, item.name, item.last_value
                        );
                    }
                }
                Err(ZabbixError::NotFound { .. }) => println!("No items found"),
                Err(e) => return Err(e.into()),
            }
        }
        Commands::Interfaces { host_ids } => {
            let lookup = || session.get_interfaces_by_host_ids(host_ids.clone());
            match retry.retry(lookup).await {
                Ok(interfaces) => {
                    for interface in interfaces {
                        println!(
                            "{:<10} host={:<10} type={} main={} {}",
                            interface.interface_id,
                            interface.host_id,
                            interface.interface_type,
                            interface.main,
                            interface.address()
                        );
                    }
                }
                Err(ZabbixError::NotFound { .. }) => println!("No interfaces found"),
                Err(e) => return Err(e.into()),
            }
        }
        Commands::CreateHostgroup { name } => {
            let response = session.create_hostgroup(&name).await?;
            println!("Created host group {}", response.group_ids.join(", "));
        }
        Commands::DeleteItems { item_ids } => {
            let response = session.delete_items(item_ids).await?;
            println!("Deleted items {}", response.item_ids.join(", "));
        }
        Commands::Logout => {
            session.logout().await?;
            info!("Session closed");
            println!("Logged out");
        }
    }

    Ok(())
}
