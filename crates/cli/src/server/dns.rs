use dns_router_infrastructure::dns::DnsServerHandler;
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tracing::{debug, error, info};

const RECV_BUFFER_SIZE: usize = 4096;

pub async fn start_dns_server(
    socket_addr: SocketAddr,
    handler: DnsServerHandler,
) -> anyhow::Result<()> {
    let socket = Arc::new(create_udp_socket(socket_addr)?);
    info!(bind_address = %socket.local_addr()?, "DNS router listening");

    tokio::select! {
        result = run_udp_loop(socket, Arc::new(handler)) => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    Ok(())
}

async fn run_udp_loop(socket: Arc<UdpSocket>, handler: Arc<DnsServerHandler>) -> io::Result<()> {
    let mut recv_buf = [0u8; RECV_BUFFER_SIZE];

    loop {
        let (n, from) = match socket.recv_from(&mut recv_buf).await {
            Ok(received) => received,
            Err(e) if is_transient(&e) => {
                debug!(error = %e, "UDP recv error");
                continue;
            }
            Err(e) => {
                error!(error = %e, "UDP recv failed, stopping listener");
                return Err(e);
            }
        };

        let owned_buf: Arc<[u8]> = Arc::from(&recv_buf[..n]);
        let handler = handler.clone();
        let socket = socket.clone();
        tokio::spawn(async move {
            if let Some(response) = handler.handle_raw(&owned_buf, from).await {
                if let Err(e) = socket.send_to(&response, from).await {
                    error!(client = %from, error = %e, "Failed to send response");
                }
            }
        });
    }
}

/// ICMP errors surfaced on the next recv, plus interrupted or spurious wakeups.
fn is_transient(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionRefused
            | io::ErrorKind::Interrupted
            | io::ErrorKind::WouldBlock
    )
}

fn create_udp_socket(socket_addr: SocketAddr) -> anyhow::Result<UdpSocket> {
    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.set_recv_buffer_size(512 * 1024)?;
    socket.set_send_buffer_size(512 * 1024)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;
    let std_socket: std::net::UdpSocket = socket.into();
    Ok(UdpSocket::from_std(std_socket)?)
}
